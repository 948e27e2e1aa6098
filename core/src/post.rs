//! Post records as returned by `condenser_api.get_content`

use crate::error::CoreError;
use chrono::{DateTime, Utc};
use payout_economics::{Beneficiary, PostRewardInput, Vote};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// `@author/permlink`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostIdentifier {
    pub author: String,
    pub permlink: String,
}

impl PostIdentifier {
    pub fn new(author: impl Into<String>, permlink: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            permlink: permlink.into(),
        }
    }

    /// Accepts `@author/permlink`, `author/permlink`, or any URL or path
    /// containing `/@author/permlink`.
    pub fn parse(link: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidIdentifier(link.to_string());

        let path = link
            .trim()
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default();
        let tail = match path.rfind("/@") {
            Some(index) => &path[index + 2..],
            None => path.strip_prefix('@').unwrap_or(path),
        };

        let mut parts = tail.trim_end_matches('/').split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(author), Some(permlink), None)
                if !author.is_empty() && !permlink.is_empty() && !author.contains('@') =>
            {
                Ok(Self::new(author, permlink))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for PostIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}/{}", self.author, self.permlink)
    }
}

/// A post or comment with everything the payout estimate needs
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub author: String,
    pub permlink: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub title: String,
    /// 0 for top-level posts, nesting level for comments
    #[serde(default)]
    pub depth: u32,
    #[serde(with = "chain_time")]
    pub created: DateTime<Utc>,
    #[serde(with = "chain_time")]
    pub cashout_time: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_votes")]
    pub active_votes: Vec<Vote>,
    #[serde(default = "default_allow_curation_rewards")]
    pub allow_curation_rewards: bool,
    #[serde(default)]
    pub beneficiaries: Vec<Beneficiary>,
}

fn default_allow_curation_rewards() -> bool {
    true
}

impl Post {
    pub fn identifier(&self) -> PostIdentifier {
        PostIdentifier::new(self.author.clone(), self.permlink.clone())
    }

    pub fn is_main_post(&self) -> bool {
        self.depth == 0
    }

    /// Whole seconds since creation
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created).num_seconds()
    }

    pub fn reward_input(&self) -> PostRewardInput<'_> {
        PostRewardInput {
            created: self.created,
            votes: &self.active_votes,
            allow_curation_rewards: self.allow_curation_rewards,
            beneficiaries: &self.beneficiaries,
        }
    }
}

#[derive(Deserialize)]
struct RawVote {
    voter: String,
    rshares: Rshares,
    #[serde(with = "chain_time")]
    time: DateTime<Utc>,
}

/// Nodes return rshares as either a JSON number or a string
#[derive(Deserialize)]
#[serde(untagged)]
enum Rshares {
    Number(i64),
    Text(String),
}

impl Rshares {
    fn value(self) -> Result<i64, String> {
        match self {
            Rshares::Number(value) => Ok(value),
            Rshares::Text(text) => text
                .parse()
                .map_err(|_| format!("invalid rshares: {}", text)),
        }
    }
}

fn deserialize_votes<'de, D>(deserializer: D) -> Result<Vec<Vote>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<RawVote>::deserialize(deserializer)?
        .into_iter()
        .map(|raw| {
            Ok(Vote {
                voter: raw.voter,
                rshares: raw.rshares.value().map_err(serde::de::Error::custom)?,
                time: raw.time,
            })
        })
        .collect()
}

/// Chain timestamps: UTC without offset, e.g. `2018-01-20T12:00:00`
pub mod chain_time {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn parse(text: &str) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(text, FORMAT)
            .map(|naive| naive.and_utc())
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(text)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            })
    }

    pub fn format(time: &DateTime<Utc>) -> String {
        time.format(FORMAT).to_string()
    }

    pub fn serialize<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse(&text).ok_or_else(|| serde::de::Error::custom(format!("invalid time: {}", text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_identifier_forms() {
        let expected = PostIdentifier::new("emrebeyler", "steem-payout-estimator");

        for link in [
            "@emrebeyler/steem-payout-estimator",
            "emrebeyler/steem-payout-estimator",
            "https://steemit.com/steemdev/@emrebeyler/steem-payout-estimator",
            "http://busy.org/@emrebeyler/steem-payout-estimator/",
            "/utopian-io/@emrebeyler/steem-payout-estimator?sort=votes#comments",
            "  @emrebeyler/steem-payout-estimator ",
        ] {
            assert_eq!(PostIdentifier::parse(link).unwrap(), expected, "{}", link);
        }
    }

    #[test]
    fn test_parse_identifier_rejects_garbage() {
        for link in ["", "@", "@author", "@author/", "steemit.com/a/b", "/@/permlink"] {
            assert!(PostIdentifier::parse(link).is_err(), "{}", link);
        }
    }

    #[test]
    fn test_identifier_display() {
        assert_eq!(PostIdentifier::new("a", "b").to_string(), "@a/b");
    }

    #[test]
    fn test_deserialize_get_content() {
        let json = r#"{
            "author": "emrebeyler",
            "permlink": "hello",
            "category": "steemdev",
            "title": "Hello",
            "depth": 0,
            "created": "2018-01-20T12:00:00",
            "cashout_time": "2018-01-27T12:00:00",
            "active_votes": [
                {"voter": "a", "rshares": 1500, "time": "2018-01-20T12:10:00", "percent": 10000},
                {"voter": "b", "rshares": "-250", "time": "2018-01-20T13:00:00"}
            ],
            "allow_curation_rewards": false,
            "beneficiaries": [{"account": "utopian.pay", "weight": 2500}]
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.is_main_post());
        assert!(!post.allow_curation_rewards);
        assert_eq!(post.active_votes.len(), 2);
        assert_eq!(post.active_votes[1].rshares, -250);
        assert_eq!(post.beneficiaries[0].weight, 2500);
        assert_eq!(
            post.created,
            Utc.with_ymd_and_hms(2018, 1, 20, 12, 0, 0).unwrap()
        );
        assert_eq!(
            post.elapsed_seconds(Utc.with_ymd_and_hms(2018, 1, 20, 12, 30, 5).unwrap()),
            1805
        );
        assert_eq!(chain_time::format(&post.cashout_time), "2018-01-27T12:00:00");
    }

    #[test]
    fn test_comment_is_not_main_post() {
        let json = r#"{
            "author": "a", "permlink": "re-b", "depth": 2,
            "created": "2018-01-20T12:00:00", "cashout_time": "2018-01-27T12:00:00"
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert!(!post.is_main_post());
        assert!(post.allow_curation_rewards);
        assert!(post.active_votes.is_empty());
    }

    #[test]
    fn test_rejects_bad_rshares() {
        let json = r#"{
            "author": "a", "permlink": "p",
            "created": "2018-01-20T12:00:00", "cashout_time": "2018-01-27T12:00:00",
            "active_votes": [{"voter": "x", "rshares": "lots", "time": "2018-01-20T12:00:00"}]
        }"#;

        assert!(serde_json::from_str::<Post>(json).is_err());
    }
}
