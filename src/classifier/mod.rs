//! AI bot classifier
//!
//! Maps a raw User-Agent header to a known AI crawler label. The pattern
//! table is an ordered list and the first matching category wins, so the
//! declaration order below is load-bearing: pattern sets are not guaranteed
//! to be disjoint.

use serde::{Deserialize, Serialize};

/// Bot label for a recognized AI crawler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotKind {
    Chatgpt,
    Claude,
    Perplexity,
    Gemini,
}

impl BotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chatgpt => "chatgpt",
            Self::Claude => "claude",
            Self::Perplexity => "perplexity",
            Self::Gemini => "gemini",
        }
    }
}

impl std::fmt::Display for BotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BotKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chatgpt" => Ok(Self::Chatgpt),
            "claude" => Ok(Self::Claude),
            "perplexity" => Ok(Self::Perplexity),
            "gemini" => Ok(Self::Gemini),
            _ => Err(format!(
                "Unknown bot kind: '{}'. Valid: chatgpt, claude, perplexity, gemini",
                s
            )),
        }
    }
}

/// How a category's patterns are compared against the User-Agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Category matches if the UA contains any pattern as a substring
    Substring,
    /// Category matches only if the UA equals a pattern exactly
    Exact,
}

/// Known AI bot patterns, checked in declaration order.
///
/// The `gemini` row uses exact equality while every other row uses substring
/// containment. The asymmetry is inherited from the production pattern table
/// and changing it would reclassify real traffic, so it stays.
pub const AI_BOT_PATTERNS: &[(BotKind, MatchKind, &[&str])] = &[
    (
        BotKind::Chatgpt,
        MatchKind::Substring,
        &[
            "ChatGPT-User/1.0",
            "GPTBot/1.0",
            "GPTBot/1.2",
            "OAI-SearchBot/1.0",
        ],
    ),
    (
        BotKind::Claude,
        MatchKind::Substring,
        &["Claude-Web", "Anthropic-AI"],
    ),
    (
        BotKind::Perplexity,
        MatchKind::Substring,
        &["PerplexityBot/1.0"],
    ),
    (BotKind::Gemini, MatchKind::Exact, &["Google"]),
];

/// Classify a User-Agent string as a known AI crawler.
///
/// Returns `None` for an empty UA or one that matches no category. The match
/// is case-sensitive and no trimming or normalization is applied; the caller
/// passes the header value through verbatim.
pub fn classify(user_agent: &str) -> Option<BotKind> {
    if user_agent.is_empty() {
        return None;
    }

    for (kind, match_kind, patterns) in AI_BOT_PATTERNS {
        let matched = patterns.iter().any(|pattern| match match_kind {
            MatchKind::Substring => user_agent.contains(pattern),
            MatchKind::Exact => user_agent == *pattern,
        });

        if matched {
            return Some(*kind);
        }
    }

    None
}
