use super::selectors::SelectorChain;
use crate::dom::PageDocument;
use std::time::Duration;

/// What the expander did before extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// No trigger on the page
    NoTrigger,

    /// A trigger exists but is not rendered
    Hidden,

    /// The trigger was activated and the flow waited for new content
    Expanded { waited: Duration },

    /// Activation was refused; extraction continues without waiting
    ActivationFailed,
}

/// Activates the "show more" trigger and waits for lazily rendered panels
///
/// The trigger is activated at most once. When it is missing or hidden this
/// returns immediately without sleeping. The wait is a cooperative
/// `tokio::time::sleep`, so the host runtime stays responsive.
pub async fn expand<D: PageDocument>(
    doc: &mut D,
    triggers: &SelectorChain,
    delay: Duration,
) -> ExpandOutcome {
    let root = doc.root();
    let Some(trigger) = triggers.first_match(&*doc, root) else {
        tracing::debug!("No show-more trigger present");
        return ExpandOutcome::NoTrigger;
    };

    if !doc.is_visible(trigger) {
        tracing::debug!("Show-more trigger is hidden, skipping expansion");
        return ExpandOutcome::Hidden;
    }

    if let Err(e) = doc.activate(trigger) {
        tracing::warn!("Failed to activate show-more trigger: {}", e);
        return ExpandOutcome::ActivationFailed;
    }

    tracing::debug!("Waiting {}ms for expanded content", delay.as_millis());
    tokio::time::sleep(delay).await;

    ExpandOutcome::Expanded { waited: delay }
}
