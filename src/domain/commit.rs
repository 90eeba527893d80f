/// One entry of a project's change history, as returned by the SCM
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeSet {
    pub message: String,
    /// Tag labels pointing at this commit
    pub tags: Vec<String>,
}

impl ChangeSet {
    pub fn new(message: impl Into<String>) -> Self {
        ChangeSet {
            message: message.into(),
            tags: Vec::new(),
        }
    }

    pub fn tagged(message: impl Into<String>, tags: &[&str]) -> Self {
        ChangeSet {
            message: message.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}
