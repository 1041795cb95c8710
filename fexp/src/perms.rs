//! POSIX permission bits (owner/group/other × read/write/execute)

use crate::error::{FexpError, FexpResult};
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PermissionSet: u32 {
        const OWNER_READ   = 0o400;
        const OWNER_WRITE  = 0o200;
        const OWNER_EXEC   = 0o100;

        const GROUP_READ   = 0o040;
        const GROUP_WRITE  = 0o020;
        const GROUP_EXEC   = 0o010;

        const OTHERS_READ  = 0o004;
        const OTHERS_WRITE = 0o002;
        const OTHERS_EXEC  = 0o001;
    }
}

/// Symbolic rendering order: flag and the character shown when it is set.
const SYMBOLIC: [(PermissionSet, char); 9] = [
    (PermissionSet::OWNER_READ, 'r'),
    (PermissionSet::OWNER_WRITE, 'w'),
    (PermissionSet::OWNER_EXEC, 'x'),
    (PermissionSet::GROUP_READ, 'r'),
    (PermissionSet::GROUP_WRITE, 'w'),
    (PermissionSet::GROUP_EXEC, 'x'),
    (PermissionSet::OTHERS_READ, 'r'),
    (PermissionSet::OTHERS_WRITE, 'w'),
    (PermissionSet::OTHERS_EXEC, 'x'),
];

impl PermissionSet {
    pub const OWNER: Self = Self::OWNER_READ
        .union(Self::OWNER_WRITE)
        .union(Self::OWNER_EXEC);

    pub const GROUP: Self = Self::GROUP_READ
        .union(Self::GROUP_WRITE)
        .union(Self::GROUP_EXEC);

    pub const OTHERS: Self = Self::OTHERS_READ
        .union(Self::OTHERS_WRITE)
        .union(Self::OTHERS_EXEC);

    /// Keep the nine standard bits of a raw `st_mode`; file type, setuid,
    /// setgid and sticky bits are dropped.
    #[must_use]
    pub fn from_mode(mode: u32) -> Self {
        Self::from_bits_truncate(mode)
    }

    #[must_use]
    pub fn mode(self) -> u32 {
        self.bits()
    }

    /// Parse an octal mode such as `755` or `0755`. Bits above the nine
    /// permission bits (setuid, setgid, sticky) are dropped.
    pub fn from_octal(input: &str) -> FexpResult<Self> {
        let invalid = || FexpError::InvalidMode(input.to_string());

        if input.is_empty() || !input.chars().all(|c| ('0'..='7').contains(&c)) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(input, 8).map_err(|_| invalid())?;
        Ok(Self::from_bits_truncate(value))
    }

    /// Three octal digits, e.g. `"644"`.
    #[must_use]
    pub fn octal(self) -> String {
        format!("{:03o}", self.bits())
    }

    /// Nine characters, `[r-][w-][x-]` for owner, group and others.
    #[must_use]
    pub fn symbolic(self) -> String {
        SYMBOLIC
            .iter()
            .map(|(flag, c)| if self.contains(*flag) { *c } else { '-' })
            .collect()
    }

    /// Inverse of [`PermissionSet::symbolic`].
    #[cfg(test)]
    pub fn from_symbolic(input: &str) -> FexpResult<Self> {
        let invalid = || FexpError::InvalidMode(input.to_string());

        let chars: Vec<char> = input.chars().collect();
        if chars.len() != SYMBOLIC.len() {
            return Err(invalid());
        }

        let mut perms = Self::empty();
        for ((flag, expected), actual) in SYMBOLIC.iter().zip(chars) {
            if actual == *expected {
                perms |= *flag;
            } else if actual != '-' {
                return Err(invalid());
            }
        }
        Ok(perms)
    }
}
