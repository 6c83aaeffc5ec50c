use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("rule table must end with a fallback rule that has no triggers")]
    MissingFallback,

    #[error("rule {0} can never match: an earlier rule has no triggers")]
    UnreachableRule(usize),
}
