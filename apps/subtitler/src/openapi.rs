use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Subtitler API",
        version = "1.0.0",
        description = "Speaker-attributed WebVTT subtitles from uploaded video, with post-hoc speaker renaming"
    ),
    paths(
        crate::routes::upload::create_job,
        crate::routes::jobs::get_job,
        crate::routes::download::download,
        crate::routes::speakers::rename_speakers,
        crate::routes::video::stream_video,
    ),
    components(
        schemas(
            crate::routes::JobSummary,
            crate::routes::JobStateView,
        )
    ),
    tags(
        (name = "jobs", description = "Upload processing, artifact download and speaker renaming")
    )
)]
struct ApiDoc;

pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
