use crate::config::ParseMode;
use crate::message::HeaderMap;
use crate::SendmailError;

/// Template used when the configured format is blank.
///
/// Emits the subject in bold (only when non-empty), the body, a `---`
/// separator, then the raw `To` and `From` headers in a preformatted block.
pub const DEFAULT_FORMAT: &str = "{{#if Subject}}*{{Subject}}*\n\n{{/if}}{{Body}}\n---\n```\nTo: {{To}}\nFrom: {{From}}```";

const TEMPLATE_NAME: &str = "message";

/// Final text sent verbatim to every destination of one delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub text: String,
    pub parse_mode: ParseMode,
}

/// Render `headers` through `format`, falling back to [`DEFAULT_FORMAT`]
/// when `format` is blank.
///
/// Headers missing from the map render as empty. An empty result is an
/// error rather than a message.
pub fn render_message(
    headers: &HeaderMap,
    format: &str,
    parse_mode: ParseMode,
) -> crate::Result<RenderedMessage> {
    let format = effective_format(format);

    let mut hbs = make_handlebars();
    hbs.register_template_string(TEMPLATE_NAME, format)
        .map_err(|e| SendmailError::TemplateParse {
            reason: e.to_string(),
        })?;
    let text = hbs
        .render(TEMPLATE_NAME, headers)
        .map_err(|e| SendmailError::TemplateRender {
            reason: e.to_string(),
        })?;

    if text.is_empty() {
        return Err(SendmailError::EmptyMessage);
    }

    Ok(RenderedMessage { text, parse_mode })
}

fn effective_format(format: &str) -> &str {
    if format.trim().is_empty() {
        DEFAULT_FORMAT
    } else {
        format
    }
}

fn make_handlebars() -> handlebars::Handlebars<'static> {
    let mut hbs = handlebars::Handlebars::new();
    hbs.register_escape_fn(handlebars::no_escape);
    hbs
}
