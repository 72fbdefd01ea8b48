use axum::{
    Form, Json,
    extract::{Path, State},
};
use hypr_subtitle::{Placeholder, RenameRequest};

use crate::error::Result;
use crate::routes::{JobSummary, parse_job_id};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/jobs/{id}/speakers",
    params(("id" = String, Path, description = "Job id")),
    request_body(
        content_type = "application/x-www-form-urlencoded",
        description = "`SPEAKER_NN=name` pairs; blank names leave the placeholder unchanged"
    ),
    responses(
        (status = 200, description = "Renames applied", body = JobSummary),
        (status = 404, description = "Unknown job"),
    ),
    tag = "jobs",
)]
pub async fn rename_speakers(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Json<JobSummary>> {
    let id = parse_job_id(&id)?;
    let renames = rename_request(pairs);
    let job = state.jobs.rename(&id, &renames).await?;
    Ok(Json(JobSummary::from(&job)))
}

/// Keeps keys that spell a placeholder. Later duplicates win.
fn rename_request(pairs: Vec<(String, String)>) -> RenameRequest {
    let mut renames = RenameRequest::new();
    for (key, name) in pairs {
        match key.parse::<Placeholder>() {
            Ok(placeholder) => {
                renames.insert(placeholder, name);
            }
            Err(_) => tracing::warn!(key = %key, "rename_key_ignored"),
        }
    }
    renames
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn non_placeholder_keys_are_dropped() {
        let renames = rename_request(pairs(&[
            ("SPEAKER_01", "Alice"),
            ("csrf", "token"),
            ("SPEAKER_2", "Bob"),
            ("SPEAKER_00", "Carol"),
        ]));

        assert_eq!(renames.len(), 1);
        assert_eq!(
            renames.get(&Placeholder::new(1).unwrap()).map(String::as_str),
            Some("Alice")
        );
    }

    #[test]
    fn later_duplicates_win() {
        let renames = rename_request(pairs(&[("SPEAKER_02", "A"), ("SPEAKER_02", "B")]));
        assert_eq!(
            renames.get(&Placeholder::new(2).unwrap()).map(String::as_str),
            Some("B")
        );
    }
}
