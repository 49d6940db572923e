//! Human-readable breakdown of an octal permission.

use serde::Serialize;

use super::convert::parse_octal;
use super::model::{PermissionSet, Subject};
use crate::error::Result;

/// Placeholder used in the chmod hint when no file is configured.
pub const DEFAULT_CHMOD_TARGET: &str = "<file>";

#[derive(Debug, Clone, Serialize)]
pub struct SubjectExplanation {
    pub subject: &'static str,
    pub short: char,
    pub triplet: String,
    pub capabilities: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub octal: String,
    pub symbolic: String,
    pub subjects: Vec<SubjectExplanation>,
    pub chmod: String,
}

impl Explanation {
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(7);
        lines.push(format!("Octal: {}", self.octal));
        lines.push(format!("Symbolic: {}", self.symbolic));

        for entry in &self.subjects {
            let capabilities = if entry.capabilities.is_empty() {
                "none".to_string()
            } else {
                entry.capabilities.join(", ")
            };
            lines.push(format!(
                "{} ({}): {} ({})",
                entry.subject, entry.short, entry.triplet, capabilities
            ));
        }

        lines.push(String::new());
        lines.push(format!("chmod command: {}", self.chmod));

        lines.join("\n")
    }
}

/// What one subject's triplet grants. Execute only counts when the bit is
/// really set, so `S`/`T` report the special bit without `execute`.
fn capabilities(perms: &PermissionSet, subject: Subject) -> Vec<&'static str> {
    let mut caps = Vec::new();

    if perms.can_read(subject) {
        caps.push("read");
    }
    if perms.can_write(subject) {
        caps.push("write");
    }
    if perms.can_execute(subject) {
        caps.push("execute");
    }
    if perms.has_special(subject) {
        caps.push(match subject {
            Subject::Owner | Subject::Group => "setuid/setgid",
            Subject::Other => "sticky",
        });
    }

    caps
}

/// Explain `octal`, echoing it back verbatim in the header and chmod hint.
pub fn explain(octal: &str, chmod_target: &str) -> Result<Explanation> {
    let perms = parse_octal(octal)?;

    let subjects = Subject::ALL
        .iter()
        .map(|subject| SubjectExplanation {
            subject: subject.label(),
            short: subject.short(),
            triplet: perms.triplet(*subject),
            capabilities: capabilities(&perms, *subject),
        })
        .collect();

    Ok(Explanation {
        octal: octal.to_string(),
        symbolic: perms.symbolic(),
        subjects,
        chmod: format!("chmod {} {}", octal, chmod_target),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn render(octal: &str) -> String {
        explain(octal, DEFAULT_CHMOD_TARGET).unwrap().render()
    }

    #[test]
    fn explain_755_contains_headers() {
        let output = render("755");
        for needle in ["755", "rwxr-xr-x", "Owner", "Group", "Other", "chmod 755"] {
            assert!(output.contains(needle), "missing {:?} in {}", needle, output);
        }
    }

    #[test]
    fn explain_layout() {
        assert_eq!(
            render("644"),
            "Octal: 644\n\
             Symbolic: rw-r--r--\n\
             Owner (u): rw- (read, write)\n\
             Group (g): r-- (read)\n\
             Other (o): r-- (read)\n\
             \n\
             chmod command: chmod 644 <file>"
        );
    }

    #[test]
    fn explain_reports_none_for_empty_triplet() {
        assert!(render("700").contains("Other (o): --- (none)"));
    }

    #[test]
    fn explain_special_bits() {
        let output = render("4755");
        assert!(output.contains("Owner (u): rws (read, write, execute, setuid/setgid)"));

        let output = render("1666");
        assert!(output.contains("Other (o): rwT (read, write, sticky)"));

        let output = render("2070");
        assert!(output.contains("Group (g): rws (read, write, execute, setuid/setgid)"));
    }

    #[test]
    fn explain_uses_chmod_target() {
        let explanation = explain("600", "~/.ssh/id_ed25519").unwrap();
        assert_eq!(explanation.chmod, "chmod 600 ~/.ssh/id_ed25519");
    }

    #[test]
    fn explain_rejects_invalid_octal() {
        let err = explain("999", DEFAULT_CHMOD_TARGET).unwrap_err();
        assert_eq!(err.code, ErrorCode::PermInvalidPermission);
    }
}
