/// A commit-shaped record: either a raw commit belonging to a pull request or
/// the synthesized result of projecting several of them into one.
///
/// `message` is always derived from `(subject, body)`; construct values
/// through [`Commit::new`] so the three fields never drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Single-line commit title
    pub subject: String,
    /// Multi-line description; empty means absent
    pub body: String,
    /// Full message: `subject`, a blank line, then `body` (subject alone when
    /// the body is empty)
    pub message: String,
}

impl Commit {
    /// Build a commit from a subject and body, deriving `message`.
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Commit {
        let subject = subject.into();
        let body = body.into();
        let message = if body.is_empty() {
            subject.clone()
        } else {
            format!("{}\n\n{}", subject, body)
        };
        Commit {
            subject,
            body,
            message,
        }
    }

    /// Build a commit from a raw message: the first line becomes the subject,
    /// the remainder (minus the separating blank line) the body.
    pub fn from_message(message: &str) -> Commit {
        let (subject, rest) = match message.split_once('\n') {
            Some((subject, rest)) => (subject, rest),
            None => (message, ""),
        };
        let body = rest.strip_prefix('\n').unwrap_or(rest);
        Commit::new(subject, body)
    }

    /// A copy of this commit with ` (#<number>)` appended to the subject, the
    /// way GitHub titles its merge commits. Body unchanged, message re-derived.
    pub fn with_pr_number(&self, number: u64) -> Commit {
        Commit::new(format!("{} (#{})", self.subject, number), self.body.clone())
    }

    /// Subjects equal; bodies not compared.
    pub fn same_subject(&self, other: &Commit) -> bool {
        self.subject == other.subject
    }

    /// Subject and body both equal. `message` is derived, so it needs no
    /// comparison of its own.
    pub fn same_content(&self, other: &Commit) -> bool {
        self.same_subject(other) && self.body == other.body
    }
}
