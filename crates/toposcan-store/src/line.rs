//! Compact line format.
//!
//! One configuration per line: chain tokens `<letter><param>` in order,
//! then side links `S<param>@<node>`, then instantons `I<param>@<node>`,
//! separated by single spaces. For example `g4 L22 g6 S882@0 I1@2`.
//! The line is the canonical form used for deduplication.

use toposcan_core::{ChainKind, Configuration, DecorationKind};

use crate::error::{Result, StoreError};

/// Serializes a configuration to its compact line.
pub fn to_line(config: &Configuration) -> String {
    config.to_string()
}

/// Parses a compact line.
///
/// Tokens are whitespace-separated. A decoration token may appear anywhere;
/// decorations keep their relative order within their kind.
///
/// # Errors
///
/// Returns [`StoreError::ParseLine`] for unknown kind letters, malformed
/// numbers, and chain tokens carrying a node index.
pub fn parse_line(line: &str) -> Result<Configuration> {
    let mut config = Configuration::new();
    for token in line.split_whitespace() {
        parse_token(token, &mut config).map_err(|reason| StoreError::ParseLine {
            line: line.to_string(),
            reason,
        })?;
    }
    Ok(config)
}

fn parse_token(token: &str, config: &mut Configuration) -> std::result::Result<(), String> {
    let mut chars = token.chars();
    let letter = chars.next().ok_or("empty token")?;
    let kind =
        ChainKind::from_letter(letter).ok_or_else(|| format!("unknown kind {:?}", letter))?;
    let rest = chars.as_str();

    match rest.split_once('@') {
        None => {
            config.add_block_right(kind, number(rest, token)?);
        }
        Some((param, node)) => {
            let deco = match kind {
                ChainKind::Side => DecorationKind::Side,
                ChainKind::Instanton => DecorationKind::Instanton,
                ChainKind::Node | ChainKind::Link => {
                    return Err(format!("{} cannot be a decoration", token))
                }
            };
            let node: usize = node
                .parse()
                .map_err(|_| format!("bad node index in {}", token))?;
            config.add_decoration(deco, number(param, token)?, node);
        }
    }
    Ok(())
}

fn number(s: &str, token: &str) -> std::result::Result<i32, String> {
    s.parse().map_err(|_| format!("bad parameter in {}", token))
}
