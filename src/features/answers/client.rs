//! Client wrappers for answer endpoints.

use crate::{
    api::{ApiClient, ApiError, ApiRequest, FormPart},
    features::{
        answers::types::{Answer, CreateAnswerRequest, MarkSolutionRequest, NewAnswer},
        tracks::Identified,
        Page,
    },
};

impl Identified for Answer {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Lists answers posted under a track.
pub async fn list_answers(
    api: &ApiClient,
    track_id: u64,
    page: Option<u32>,
) -> Result<Page<Answer>, ApiError> {
    let mut request = ApiRequest::get(format!("/answers/{track_id}/"));
    if let Some(page) = page {
        request = request.query("page", page);
    }
    api.send_json(&request).await
}

/// Posts an answer. Sent as JSON unless images are attached.
pub async fn post_answer(
    api: &ApiClient,
    track_id: u64,
    answer: NewAnswer,
) -> Result<Answer, ApiError> {
    let comment = answer.comment.trim();
    if comment.is_empty() {
        return Err(ApiError::Validation("Answer comment is required".to_string()));
    }

    let path = format!("/answers/{track_id}/");
    let request = if answer.images.is_empty() {
        ApiRequest::post(path).json(&CreateAnswerRequest {
            comment,
            solution: answer.solution,
        })?
    } else {
        let mut parts = vec![
            FormPart::text("comment", comment),
            FormPart::text("solution", answer.solution),
        ];
        parts.extend(answer.images.into_iter().map(|image| image.into_part("images")));
        ApiRequest::post(path).multipart(parts)
    };

    api.send_json(&request).await
}

/// Marks an answer as the solution of its track.
pub async fn mark_solution(api: &ApiClient, answer_id: u64) -> Result<Answer, ApiError> {
    api.patch_json(
        &format!("/track-answers/{answer_id}/"),
        &MarkSolutionRequest { solution: true },
    )
    .await
}
