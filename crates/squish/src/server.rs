//! MCP (Model Context Protocol) server implementation.
//!
//! This module exposes shortcut synthesis over the MCP protocol, making it
//! available to AI assistants via stdio transport.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer. It wraps the same core library
//! that the CLI commands use, and each `#[tool]` method delegates to core
//! library functions rather than implementing logic directly.

use std::collections::BTreeMap;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use squish_core::config::Config;
use squish_core::corpus::Corpus;
use squish_core::{
    PriorMatch, Shortcut, SynthesisParams, Vocabulary, match_previous, possible_abbreviations,
    synthesize,
};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `suggest_shortcuts` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SuggestShortcutsParams {
    /// Corpus text, one message per line.
    pub text: String,
    /// Longest phrase, in words.
    pub max_ngram: Option<usize>,
    /// How many ranked phrases to abbreviate.
    pub top_k: Option<usize>,
    /// Ignore phrases seen this many times or fewer.
    pub min_count: Option<usize>,
}

/// Parameters for the `candidate_abbreviations` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CandidateAbbreviationsParams {
    /// Phrase to abbreviate.
    pub phrase: String,
}

/// Parameters for the `match_previous` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct MatchPreviousParams {
    /// Existing phrase → abbreviation mapping.
    pub shortcuts: BTreeMap<String, String>,
    /// Phrase to derive an abbreviation for.
    pub phrase: String,
}

#[derive(Serialize)]
struct SuggestResponse {
    lines: usize,
    ranked: usize,
    skipped: Vec<String>,
    shortcuts: Vec<Shortcut>,
}

#[derive(Serialize)]
struct MatchResponse {
    phrase: String,
    #[serde(flatten)]
    found: Option<PriorMatch>,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

/// MCP server exposing shortcut synthesis to AI assistants.
///
/// Each `#[tool]` method in the `#[tool_router]` impl block is automatically
/// registered and callable via the MCP protocol.
#[derive(Clone)]
pub struct ProjectServer {
    config: Config,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a server with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a server whose tools follow `config`.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            tool_router: Self::tool_router(),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Derive shortcuts from a corpus passed inline.
    #[tool(
        description = "Derive text-expansion shortcuts from a corpus (one message per line). Returns shortcuts with counts and savings."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn suggest_shortcuts(
        &self,
        Parameters(params): Parameters<SuggestShortcutsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "suggest_shortcuts", bytes = params.text.len(), "executing MCP tool");

        if let Some(limit) = self.config.input_limit()
            && params.text.len() > limit
        {
            return Err(McpError::invalid_params(
                format!("text is {} bytes (limit: {limit} bytes)", params.text.len()),
                None,
            ));
        }

        let base = SynthesisParams::from_config(&self.config);
        let synthesis_params = SynthesisParams {
            max_ngram: params.max_ngram.unwrap_or(base.max_ngram),
            top_k: params.top_k.unwrap_or(base.top_k),
            min_count: params.min_count.unwrap_or(base.min_count),
        };

        let corpus = Corpus::from_text(&params.text, self.config.strip_chat_markup);
        let vocab = Vocabulary::from_config(&self.config);
        let result = synthesize(&corpus.lines, &synthesis_params, &vocab);

        let response = SuggestResponse {
            lines: corpus.lines.len(),
            ranked: result.ranked.len(),
            skipped: result
                .outcome
                .skipped
                .iter()
                .map(|r| r.phrase.clone())
                .collect(),
            shortcuts: result.shortcuts(),
        };

        tracing::info!(
            tool = "suggest_shortcuts",
            shortcuts = response.shortcuts.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &response,
        )?)]))
    }

    /// List abbreviation candidates for a phrase.
    #[tool(
        description = "List abbreviation candidates for a phrase, most preferred first. May contain duplicates."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn candidate_abbreviations(
        &self,
        Parameters(params): Parameters<CandidateAbbreviationsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "candidate_abbreviations", phrase = %params.phrase, "executing MCP tool");

        let candidates = possible_abbreviations(&params.phrase.to_lowercase());

        tracing::info!(
            tool = "candidate_abbreviations",
            count = candidates.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &candidates,
        )?)]))
    }

    /// Derive an abbreviation from existing shortcuts.
    #[tool(
        description = "Derive an abbreviation for a phrase from existing shortcuts: plurals add 's', multi-word phrases join each word's first letter."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn match_previous(
        &self,
        Parameters(params): Parameters<MatchPreviousParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "match_previous", phrase = %params.phrase, "executing MCP tool");

        let found = match_previous(&params.shortcuts, &params.phrase);
        let response = MatchResponse {
            phrase: params.phrase,
            found,
        };

        tracing::info!(
            tool = "match_previous",
            matched = response.found.is_some(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &response,
        )?)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use suggest_shortcuts on a corpus of typed messages to get text-expansion shortcuts.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    #[test]
    fn server_info_has_correct_name() {
        let server = ProjectServer::new();
        let info = ServerHandler::get_info(&server);

        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn server_has_tools_capability() {
        let server = ProjectServer::new();
        let info = ServerHandler::get_info(&server);

        assert!(info.capabilities.tools.is_some());
    }

    /// Extract text from the first content item in a `CallToolResult`.
    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let server = ProjectServer::new();
        let params = Parameters(GetInfoParams {
            format: "json".to_string(),
        });

        let result = server.get_info(params).expect("get_info should succeed");
        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value =
            serde_json::from_str(text).expect("output should be valid JSON");

        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    }

    #[test]
    fn suggest_shortcuts_tool_works() {
        let server = ProjectServer::new();
        let text = "Good morning team\n".repeat(5);
        let params = Parameters(SuggestShortcutsParams {
            text,
            max_ngram: None,
            top_k: None,
            min_count: None,
        });

        let result = server
            .suggest_shortcuts(params)
            .expect("suggest_shortcuts should succeed");
        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value = serde_json::from_str(text).expect("valid JSON");

        assert_eq!(json["lines"], 5);
        let shortcuts = json["shortcuts"].as_array().unwrap();
        assert!(
            shortcuts
                .iter()
                .any(|s| s["phrase"] == "good morning team" && s["count"] == 5)
        );
    }

    #[test]
    fn suggest_shortcuts_rejects_oversized_text() {
        let config = Config {
            max_input_bytes: Some(8),
            ..Config::default()
        };
        let server = ProjectServer::with_config(config);
        let params = Parameters(SuggestShortcutsParams {
            text: "far too long for the limit".to_string(),
            max_ngram: None,
            top_k: None,
            min_count: None,
        });
        assert!(server.suggest_shortcuts(params).is_err());
    }

    #[test]
    fn candidate_abbreviations_tool_works() {
        let server = ProjectServer::new();
        let params = Parameters(CandidateAbbreviationsParams {
            phrase: "Robot".to_string(),
        });

        let result = server
            .candidate_abbreviations(params)
            .expect("candidate_abbreviations should succeed");
        let text = extract_text(&result).expect("should have text content");
        let list: Vec<String> = serde_json::from_str(text).expect("valid JSON");
        assert_eq!(list[0], "r");
        assert_eq!(list[1], "rt");
    }

    #[test]
    fn match_previous_tool_works() {
        let server = ProjectServer::new();
        let params = Parameters(MatchPreviousParams {
            shortcuts: BTreeMap::from([("robot".to_string(), "r".to_string())]),
            phrase: "robots".to_string(),
        });

        let result = server
            .match_previous(params)
            .expect("match_previous should succeed");
        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value = serde_json::from_str(text).expect("valid JSON");
        assert_eq!(json["abbreviation"], "rs");
        assert_eq!(json["kind"], "plural");
    }

    #[test]
    fn match_previous_tool_reports_no_match() {
        let server = ProjectServer::new();
        let params = Parameters(MatchPreviousParams {
            shortcuts: BTreeMap::new(),
            phrase: "asdf".to_string(),
        });

        let result = server
            .match_previous(params)
            .expect("match_previous should succeed");
        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value = serde_json::from_str(text).expect("valid JSON");
        assert!(json.get("abbreviation").is_none());
    }
}
