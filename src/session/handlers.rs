//! Session message handlers
//!
//! Thin dispatch from [`Msg`] to the session transitions.

use crate::error::AnnotatorError;
use crate::session::messages::{Msg, Reply};
use crate::session::state::Session;

/// Apply a message to the session.
///
/// Errors leave the session as it was before the message.
pub fn update(session: &mut Session, msg: Msg) -> Result<Reply, AnnotatorError> {
    match msg {
        Msg::Upload(bytes) => {
            let (width, height) = session.upload(&bytes)?;
            Ok(Reply::Loaded { width, height })
        }
        Msg::EditField(field, value) => Ok(Reply::Preview(session.edit_field(field, &value))),
        Msg::EditBboxText(text) => Ok(Reply::Preview(session.edit_bbox_text(&text))),
        Msg::SetMode(mode) => {
            session.mode = mode;
            Ok(Reply::Updated)
        }
        Msg::SetColor(color) => {
            session.color = color;
            Ok(Reply::Updated)
        }
        Msg::RenderRequest => session.request_render().map(Reply::Render),
        Msg::Acknowledge(accept) => session.acknowledge(accept).map(Reply::Render),
        Msg::FinishRender => {
            let result = session.finish_render()?;
            Ok(Reply::Rendered(result.bbox))
        }
        Msg::DownloadRequest(dir) => session.download(&dir).map(Reply::Saved),
        Msg::Clear => {
            session.clear();
            Ok(Reply::Cleared)
        }
    }
}
