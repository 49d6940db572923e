use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CommonPattern {
    pub octal: &'static str,
    pub symbolic: &'static str,
    pub description: &'static str,
}

pub const COMMON_PATTERNS: [CommonPattern; 8] = [
    CommonPattern {
        octal: "644",
        symbolic: "rw-r--r--",
        description: "Files: Owner read/write, others read only",
    },
    CommonPattern {
        octal: "664",
        symbolic: "rw-rw-r--",
        description: "Files: Owner and group read/write, others read only",
    },
    CommonPattern {
        octal: "600",
        symbolic: "rw-------",
        description: "Files: Owner read/write only (private)",
    },
    CommonPattern {
        octal: "755",
        symbolic: "rwxr-xr-x",
        description: "Executables/Dirs: Owner full, others read/execute",
    },
    CommonPattern {
        octal: "775",
        symbolic: "rwxrwxr-x",
        description: "Executables/Dirs: Owner and group full, others read/execute",
    },
    CommonPattern {
        octal: "700",
        symbolic: "rwx------",
        description: "Executables/Dirs: Owner full only (private)",
    },
    CommonPattern {
        octal: "777",
        symbolic: "rwxrwxrwx",
        description: "Full access for everyone (dangerous!)",
    },
    CommonPattern {
        octal: "000",
        symbolic: "---------",
        description: "No access for anyone",
    },
];

pub fn render_common() -> String {
    let mut lines = vec!["Common Permission Patterns:".to_string(), String::new()];

    for pattern in COMMON_PATTERNS.iter() {
        lines.push(format!(
            "{} ({})  {}",
            pattern.octal, pattern.symbolic, pattern.description
        ));
    }

    lines.join("\n")
}
