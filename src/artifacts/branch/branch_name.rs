use crate::artifacts::branch::{DEFAULT_BRANCH, INVALID_BRANCH_NAME_REGEX};
use crate::error::TwigError;
use anyhow::Context;

/// Validated name of a branch under `refs/heads/`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            return Err(TwigError::InvalidBranchName(name).into());
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            Err(TwigError::InvalidBranchName(name).into())
        } else {
            Ok(Self(name))
        }
    }

    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }

    /// Path of the branch file relative to the metadata directory
    pub fn as_ref_path(&self) -> String {
        format!("refs/heads/{}", self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::proptest;
    use rstest::rstest;

    proptest! {
        #[test]
        fn accepts_plain_and_hierarchical_names(
            prefix in "[a-zA-Z0-9_-]+",
            suffix in "[a-zA-Z0-9_-]+"
        ) {
            assert!(BranchName::try_parse(prefix.clone()).is_ok());
            assert!(BranchName::try_parse(format!("{}/{}", prefix, suffix)).is_ok());
        }

        #[test]
        fn rejects_special_characters(
            prefix in "[a-zA-Z0-9_-]+",
            suffix in "[a-zA-Z0-9_-]+",
            special_char in r"[\*:\?\[\\^~ ]"
        ) {
            let branch_name = format!("{}{}{}", prefix, special_char, suffix);
            assert!(BranchName::try_parse(branch_name).is_err());
        }
    }

    #[rstest]
    #[case("")]
    #[case(".hidden")]
    #[case("feature/.hidden")]
    #[case("a..b")]
    #[case("/leading")]
    #[case("trailing/")]
    #[case("topic.lock")]
    #[case("at@{brace}")]
    fn rejects_malformed_names(#[case] name: &str) {
        let err = BranchName::try_parse(name.to_string()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TwigError>(),
            Some(TwigError::InvalidBranchName(_))
        ));
    }

    #[test]
    fn ref_path_lives_under_heads() -> anyhow::Result<()> {
        let name = BranchName::try_parse("feature/login".to_string())?;

        assert_eq!(name.as_ref_path(), "refs/heads/feature/login");

        Ok(())
    }
}
