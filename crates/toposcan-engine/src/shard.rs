//! Deterministic output paths.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use toposcan_core::{Category, Configuration, DecorationKind};

use crate::error::EngineError;

/// Kind letters that name a shard file.
pub const PREFIX_LEN: usize = 4;

/// Whether the decoration kind tag leads the shard prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PrefixMode {
    #[default]
    None,
    /// Always prepend the tag.
    Kind,
    /// Prepend the tag only for decorations on the head node.
    HeadKind,
}

impl FromStr for PrefixMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(PrefixMode::None),
            "kind" => Ok(PrefixMode::Kind),
            "head-kind" => Ok(PrefixMode::HeadKind),
            other => Err(EngineError::selector("prefix", other)),
        }
    }
}

impl fmt::Display for PrefixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrefixMode::None => "none",
            PrefixMode::Kind => "kind",
            PrefixMode::HeadKind => "head-kind",
        })
    }
}

/// The decoration that produced a configuration, for tagged prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindTag {
    pub kind: DecorationKind,
    pub node: usize,
}

/// `<out>/<category>/len-<n>/<prefix>.txt`.
///
/// The prefix is the first [`PREFIX_LEN`] kind letters, led by the
/// decoration letter when `mode` asks for it.
pub fn shard_path(
    out_dir: &Path,
    category: Category,
    config: &Configuration,
    mode: PrefixMode,
    tag: Option<KindTag>,
) -> PathBuf {
    let mut prefix = config.kind_prefix(PREFIX_LEN);
    if let Some(tag) = tag {
        let tagged = match mode {
            PrefixMode::None => false,
            PrefixMode::Kind => true,
            PrefixMode::HeadKind => tag.node == 0,
        };
        if tagged {
            prefix.insert(0, tag.kind.letter());
        }
    }
    out_dir
        .join(category.as_str())
        .join(format!("len-{}", config.len()))
        .join(format!("{}.txt", prefix))
}

/// `<out>/IF_<category>.txt`, the matrix files written by classification.
pub fn matrix_path(out_dir: &Path, category: Category) -> PathBuf {
    out_dir.join(format!("IF_{}.txt", category.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use toposcan_core::ChainKind;

    fn chain() -> Configuration {
        let mut config = Configuration::single(ChainKind::Node, 4);
        config
            .add_block_right(ChainKind::Link, 22)
            .add_block_right(ChainKind::Node, 6)
            .add_block_right(ChainKind::Link, 22)
            .add_block_right(ChainKind::Node, 6);
        config
    }

    #[test]
    fn test_plain_shard() {
        let path = shard_path(Path::new("out"), Category::Scft, &chain(), PrefixMode::None, None);
        assert_eq!(path, Path::new("out/SCFT/len-5/gLgL.txt"));
    }

    #[test]
    fn test_kind_tag_always() {
        let tag = KindTag {
            kind: DecorationKind::Instanton,
            node: 2,
        };
        let path = shard_path(Path::new("out"), Category::Lst, &chain(), PrefixMode::Kind, Some(tag));
        assert_eq!(path, Path::new("out/LST/len-5/IgLgL.txt"));
    }

    #[test]
    fn test_head_kind_only_on_head() {
        let off_head = KindTag {
            kind: DecorationKind::Side,
            node: 2,
        };
        let on_head = KindTag {
            kind: DecorationKind::Side,
            node: 0,
        };
        let config = chain();
        let out = Path::new("out");
        assert_eq!(
            shard_path(out, Category::Scft, &config, PrefixMode::HeadKind, Some(off_head)),
            Path::new("out/SCFT/len-5/gLgL.txt")
        );
        assert_eq!(
            shard_path(out, Category::Scft, &config, PrefixMode::HeadKind, Some(on_head)),
            Path::new("out/SCFT/len-5/SgLgL.txt")
        );
    }

    #[test]
    fn test_empty_configuration_shard() {
        let path = shard_path(
            Path::new("out"),
            Category::Lst,
            &Configuration::new(),
            PrefixMode::None,
            None,
        );
        assert_eq!(path, Path::new("out/LST/len-0/empty.txt"));
    }

    #[test]
    fn test_matrix_path() {
        assert_eq!(
            matrix_path(Path::new("out"), Category::Scft),
            Path::new("out/IF_SCFT.txt")
        );
    }

    #[test]
    fn test_prefix_mode_parse() {
        assert_eq!("none".parse::<PrefixMode>().unwrap(), PrefixMode::None);
        assert_eq!("kind".parse::<PrefixMode>().unwrap(), PrefixMode::Kind);
        assert_eq!("head-kind".parse::<PrefixMode>().unwrap(), PrefixMode::HeadKind);
        assert!("tail".parse::<PrefixMode>().is_err());
        assert_eq!(PrefixMode::HeadKind.to_string(), "head-kind");
    }
}
