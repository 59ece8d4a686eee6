//! Error handling utilities for MCP server

use rmcp::ErrorData;
use smartdate_core::SmartdateError;

/// Maps core errors to MCP errors; rejected input is the caller's fault.
pub fn to_mcp_error(message: &str, error: &SmartdateError) -> ErrorData {
    match error {
        SmartdateError::InvalidTimestamp { .. } => {
            ErrorData::invalid_params(format!("{message}: {error}"), None)
        }
        _ => ErrorData::internal_error(format!("{message}: {error}"), None),
    }
}
