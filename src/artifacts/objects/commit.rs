//! Commit object
//!
//! Commits are immutable snapshot records. They contain:
//! - A tree fingerprint (directory snapshot)
//! - At most one parent commit fingerprint (`null` for the root commit)
//! - Author and committer information
//! - Commit message
//!
//! ## Format
//!
//! ```text
//! tree <tree-fp>
//! parent <parent-fp|null>
//! author <name> <<email>> <timestamp> <timezone>
//! committer <name> <<email>> <timestamp> <timezone>
//!
//! <commit message>
//! ```

use crate::areas::config::UserConfig;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::io::BufRead;

/// Literal stored in the `parent` field of a root commit
pub const NULL_PARENT: &str = "null";

pub const AUTHOR_NAME_ENV: &str = "TWIG_AUTHOR_NAME";
pub const AUTHOR_EMAIL_ENV: &str = "TWIG_AUTHOR_EMAIL";
pub const AUTHOR_DATE_ENV: &str = "TWIG_AUTHOR_DATE";

/// Author or committer information
///
/// Contains name, email, and timestamp with timezone information.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    /// Create a new author with the current timestamp
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Resolve the commit identity
    ///
    /// `TWIG_AUTHOR_NAME` and `TWIG_AUTHOR_EMAIL` override the repository
    /// config; `TWIG_AUTHOR_DATE` pins the timestamp, otherwise the current
    /// time is used.
    pub fn load(config: &UserConfig) -> anyhow::Result<Self> {
        let name = std::env::var(AUTHOR_NAME_ENV).unwrap_or_else(|_| config.name.clone());
        let email = std::env::var(AUTHOR_EMAIL_ENV).unwrap_or_else(|_| config.email.clone());

        let timestamp = match std::env::var(AUTHOR_DATE_ENV) {
            Ok(date_str) => Some(
                chrono::DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| {
                        chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z")
                    })
                    .with_context(|| format!("{AUTHOR_DATE_ENV} is not a valid date: {date_str}"))?,
            ),
            Err(_) => None,
        };

        match timestamp {
            Some(ts) => Ok(Author::new_with_timestamp(name, email, ts)),
            None => Ok(Author::new(name, email)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Format complete author info including timestamp
    ///
    /// # Returns
    ///
    /// String in format "Name <email> timestamp timezone"
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Format timestamp in human-readable form, like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }
}

impl TryFrom<&str> for Author {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Format: "name <email> timestamp timezone"
        // Split from right to get timezone and timestamp first
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(anyhow::anyhow!("Invalid author format"));
        }

        let timezone = parts[0];
        let timestamp = parts[1]
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("Invalid timestamp"))?;
        let name_email_part = parts[2];

        let email_start = name_email_part
            .find('<')
            .ok_or_else(|| anyhow::anyhow!("Invalid author format: missing '<'"))?;
        let email_end = name_email_part
            .rfind('>')
            .ok_or_else(|| anyhow::anyhow!("Invalid author format: missing '>'"))?;
        if email_end < email_start {
            return Err(anyhow::anyhow!("Invalid author format: misplaced '>'"));
        }

        let name = name_email_part[..email_start].trim().to_string();
        let email = name_email_part[email_start + 1..email_end].to_string();

        let offset = chrono::DateTime::parse_from_str(
            &format!("1970-01-01 00:00:00 {}", timezone),
            "%Y-%m-%d %H:%M:%S %z",
        )
        .map_err(|_| anyhow::anyhow!("Invalid timezone"))?
        .offset()
        .to_owned();
        let datetime = chrono::DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| anyhow::anyhow!("Invalid timestamp"))?
            .with_timezone(&offset);

        Ok(Author {
            name,
            email,
            timestamp: datetime,
        })
    }
}

/// Immutable snapshot record
///
/// Every commit has exactly one tree and at most one parent, so each branch
/// history is a singly linked chain ending at the root commit.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    parent: Option<ObjectId>,
    tree_oid: ObjectId,
    author: Author,
    committer: Author,
    message: String,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        tree_oid: ObjectId,
        author: Author,
        message: String,
    ) -> Self {
        Commit {
            parent,
            tree_oid,
            author: author.clone(),
            committer: author,
            message,
        }
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn committer(&self) -> &Author {
        &self.committer
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(Bytes::from(self.display()))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content).context("commit record is not valid UTF-8")?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing blank line before message")?;
        let mut lines = header.lines();

        let tree_oid = lines
            .next()
            .and_then(|line| line.strip_prefix("tree "))
            .context("Invalid commit object: invalid tree line")?;
        let tree_oid = ObjectId::try_parse(tree_oid.to_string())?;

        let parent = lines
            .next()
            .and_then(|line| line.strip_prefix("parent "))
            .context("Invalid commit object: invalid parent line")?;
        let parent = match parent {
            NULL_PARENT => None,
            oid => Some(ObjectId::try_parse(oid.to_string())?),
        };

        let author = lines
            .next()
            .and_then(|line| line.strip_prefix("author "))
            .context("Invalid commit object: invalid author line")?;
        let author = Author::try_from(author)?;

        let committer = lines
            .next()
            .and_then(|line| line.strip_prefix("committer "))
            .context("Invalid commit object: invalid committer line")?;
        let committer = Author::try_from(committer)?;

        if lines.next().is_some() {
            anyhow::bail!("Invalid commit object: unexpected header line");
        }

        Ok(Commit {
            parent,
            tree_oid,
            author,
            committer,
            message: message.to_string(),
        })
    }
}

impl Object for Commit {
    fn display(&self) -> String {
        let parent = self
            .parent
            .as_ref()
            .map(|oid| oid.as_ref())
            .unwrap_or(NULL_PARENT);

        format!(
            "tree {}\nparent {}\nauthor {}\ncommitter {}\n\n{}",
            self.tree_oid,
            parent,
            self.author.display(),
            self.committer.display(),
            self.message
        )
    }
}
