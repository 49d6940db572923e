//! Canonical POSIX permission set.
//!
//! A `PermissionSet` is four 3-bit fields: the special bits (setuid, setgid,
//! sticky) and the owner/group/other read-write-execute masks. Values are
//! `Copy` and never mutated; every operation builds a new one.

use std::fmt;

pub const READ: u8 = 0o4;
pub const WRITE: u8 = 0o2;
pub const EXECUTE: u8 = 0o1;

pub const SETUID: u8 = 0o4;
pub const SETGID: u8 = 0o2;
pub const STICKY: u8 = 0o1;

/// Highest mode the model can hold (special digit plus three rwx digits).
pub const MAX_MODE: u32 = 0o7777;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Owner,
    Group,
    Other,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Owner, Subject::Group, Subject::Other];

    pub fn label(self) -> &'static str {
        match self {
            Subject::Owner => "Owner",
            Subject::Group => "Group",
            Subject::Other => "Other",
        }
    }

    /// Letter used by chmod's symbolic mode (`u`, `g`, `o`).
    pub fn short(self) -> char {
        match self {
            Subject::Owner => 'u',
            Subject::Group => 'g',
            Subject::Other => 'o',
        }
    }

    /// The special bit that shares this subject's execute column.
    pub fn special_bit(self) -> u8 {
        match self {
            Subject::Owner => SETUID,
            Subject::Group => SETGID,
            Subject::Other => STICKY,
        }
    }

    fn index(self) -> usize {
        match self {
            Subject::Owner => 0,
            Subject::Group => 1,
            Subject::Other => 2,
        }
    }

    fn special_char(self, execute: bool) -> char {
        match (self, execute) {
            (Subject::Owner | Subject::Group, true) => 's',
            (Subject::Owner | Subject::Group, false) => 'S',
            (Subject::Other, true) => 't',
            (Subject::Other, false) => 'T',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PermissionSet {
    special: u8,
    rwx: [u8; 3],
}

impl PermissionSet {
    /// Build from a numeric mode. Bits above `0o7777` are discarded.
    pub fn from_mode(mode: u32) -> Self {
        let mode = mode & MAX_MODE;
        Self {
            special: ((mode >> 9) & 0o7) as u8,
            rwx: [
                ((mode >> 6) & 0o7) as u8,
                ((mode >> 3) & 0o7) as u8,
                (mode & 0o7) as u8,
            ],
        }
    }

    pub fn mode(&self) -> u32 {
        (u32::from(self.special) << 9)
            | (u32::from(self.rwx[0]) << 6)
            | (u32::from(self.rwx[1]) << 3)
            | u32::from(self.rwx[2])
    }

    pub fn special(&self) -> u8 {
        self.special
    }

    pub fn digit(&self, subject: Subject) -> u8 {
        self.rwx[subject.index()]
    }

    pub fn can_read(&self, subject: Subject) -> bool {
        self.digit(subject) & READ != 0
    }

    pub fn can_write(&self, subject: Subject) -> bool {
        self.digit(subject) & WRITE != 0
    }

    pub fn can_execute(&self, subject: Subject) -> bool {
        self.digit(subject) & EXECUTE != 0
    }

    /// Whether the special bit tied to this subject (setuid, setgid or sticky) is set.
    pub fn has_special(&self, subject: Subject) -> bool {
        self.special & subject.special_bit() != 0
    }

    /// Three-character `rwx` column for one subject, with the execute
    /// position folded together with the subject's special bit.
    pub fn triplet(&self, subject: Subject) -> String {
        let read = if self.can_read(subject) { 'r' } else { '-' };
        let write = if self.can_write(subject) { 'w' } else { '-' };
        let execute = self.can_execute(subject);

        let exec = if self.has_special(subject) {
            subject.special_char(execute)
        } else if execute {
            'x'
        } else {
            '-'
        };

        [read, write, exec].iter().collect()
    }

    /// Nine-character symbolic form, e.g. `rwsr-xr-x`.
    pub fn symbolic(&self) -> String {
        Subject::ALL.iter().map(|s| self.triplet(*s)).collect()
    }

    /// Octal form: three digits, or four when any special bit is set.
    pub fn octal(&self) -> String {
        let [owner, group, other] = self.rwx;
        if self.special > 0 {
            format!("{}{}{}{}", self.special, owner, group, other)
        } else {
            format!("{}{}{}", owner, group, other)
        }
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbolic())
    }
}
