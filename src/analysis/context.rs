use serde::Deserialize;

use crate::SlangError;

/// The Source chapters, each one unlocks more of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "i64")]
pub enum Chapter {
    Source1 = 1,
    Source2 = 2,
    Source3 = 3,
    Source4 = 4,
}

impl TryFrom<i64> for Chapter {
    type Error = SlangError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Chapter::Source1),
            2 => Ok(Chapter::Source2),
            3 => Ok(Chapter::Source3),
            4 => Ok(Chapter::Source4),
            other => Err(SlangError::InvalidChapter(other)),
        }
    }
}

/// Language variant selected alongside the chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Default,
    Typed,
    Native,
    Explicit,
}

/// Per document settings the rules are evaluated against, fixed for a whole traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Context {
    pub chapter: Chapter,
    #[serde(default)]
    pub variant: Variant,
}

impl Context {
    pub fn new(chapter: Chapter) -> Self {
        Self {
            chapter,
            variant: Variant::Default,
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_order() {
        assert!(Chapter::Source1 < Chapter::Source2);
        assert!(Chapter::Source2 < Chapter::Source3);
        assert!(Chapter::Source4 >= Chapter::Source3);
    }

    #[test]
    fn test_context_from_json() {
        let ctx: Context = serde_json::from_str(r#"{ "chapter": 2, "variant": "typed" }"#).unwrap();
        assert_eq!(ctx, Context::new(Chapter::Source2).with_variant(Variant::Typed));

        let ctx: Context = serde_json::from_str(r#"{ "chapter": 4 }"#).unwrap();
        assert_eq!(ctx.variant, Variant::Default);
    }

    #[test]
    fn test_invalid_chapter() {
        assert!(matches!(Chapter::try_from(5), Err(SlangError::InvalidChapter(5))));
        assert!(serde_json::from_str::<Context>(r#"{ "chapter": 0 }"#).is_err());
    }
}
