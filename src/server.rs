//! # MCP Server
//!
//! Exposes the operation handlers as MCP tools over the `rmcp` router. Every
//! tool answers with a single text item; failures are text too, so a client
//! never sees a protocol error for bad input or a failed scan.

use crate::external::custom::CustomScanParams;
use crate::external::dirb::DirbParams;
use crate::external::nikto::NiktoParams;
use crate::external::nmap::NmapParams;
use crate::external::ping::PingSweepParams;
use crate::external::searchsploit::SearchsploitParams;
use crate::external::sqlmap::SqlmapParams;
use crate::external::wpscan::WpscanParams;
use crate::handlers::{self, ToolContext};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};

const INSTRUCTIONS: &str = "Security testing tools for educational use and authorized \
penetration testing only. Wraps nmap, nikto, sqlmap, wpscan, dirb, searchsploit and ping. \
Only scan systems you own or have written permission to test.";

fn text(body: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(body)]))
}

#[derive(Clone)]
pub struct SecurityServer {
    context: ToolContext,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SecurityServer {
    pub fn new(context: ToolContext) -> Self {
        Self {
            context,
            tool_router: Self::tool_router(),
        }
    }

    /// Names of every registered tool, in registration order
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect()
    }

    #[tool(
        description = "Perform an nmap scan against a host or network. scan_type is one of basic, quick, comprehensive, stealth, udp, version or os; ports takes a list or range; timing takes a template such as T4."
    )]
    async fn nmap_scan(
        &self,
        Parameters(params): Parameters<NmapParams>,
    ) -> Result<CallToolResult, McpError> {
        text(handlers::nmap_scan(&self.context, params).await)
    }

    #[tool(
        description = "Perform a nikto web server vulnerability scan. Optional plugin selection and tuning categories."
    )]
    async fn nikto_scan(
        &self,
        Parameters(params): Parameters<NiktoParams>,
    ) -> Result<CallToolResult, McpError> {
        text(handlers::nikto_scan(&self.context, params).await)
    }

    #[tool(
        description = "Test a URL for SQL injection with sqlmap in batch mode at risk 1, level 1. Optionally restrict the parameter or technique, or list the tables of a database."
    )]
    async fn sqlmap_test(
        &self,
        Parameters(params): Parameters<SqlmapParams>,
    ) -> Result<CallToolResult, McpError> {
        text(handlers::sqlmap_test(&self.context, params).await)
    }

    #[tool(
        description = "Scan a WordPress site with wpscan. enumerate defaults to vp (vulnerable plugins); an API token enables vulnerability data."
    )]
    async fn wpscan_test(
        &self,
        Parameters(params): Parameters<WpscanParams>,
    ) -> Result<CallToolResult, McpError> {
        text(handlers::wpscan_test(&self.context, params).await)
    }

    #[tool(
        description = "Brute force web directories and files with dirb. Optional wordlist, extensions and a thread count capped by the server."
    )]
    async fn dirb_scan(
        &self,
        Parameters(params): Parameters<DirbParams>,
    ) -> Result<CallToolResult, McpError> {
        text(handlers::dirb_scan(&self.context, params).await)
    }

    #[tool(
        description = "Search the local exploit database with searchsploit. Optional type filter; set exact to true for exact title matches."
    )]
    async fn searchsploit_lookup(
        &self,
        Parameters(params): Parameters<SearchsploitParams>,
    ) -> Result<CallToolResult, McpError> {
        text(handlers::searchsploit_lookup(&self.context, params).await)
    }

    #[tool(
        description = "Discover live hosts. CIDR or dash ranges use an nmap ping scan; a single host is pinged count times (1-10, default 3)."
    )]
    async fn ping_sweep(
        &self,
        Parameters(params): Parameters<PingSweepParams>,
    ) -> Result<CallToolResult, McpError> {
        text(handlers::ping_sweep(&self.context, params).await)
    }

    #[tool(
        description = "Run an allowed tool (nmap, nikto, sqlmap, wpscan, dirb, curl, wget, nc, telnet) with raw options against a target."
    )]
    async fn custom_scan(
        &self,
        Parameters(params): Parameters<CustomScanParams>,
    ) -> Result<CallToolResult, McpError> {
        text(handlers::custom_scan(&self.context, params).await)
    }
}

#[tool_handler]
impl ServerHandler for SecurityServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::external::{CommandRunner, CommandSpec, ExecutionResult};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    struct EchoRunner;

    #[async_trait]
    impl CommandRunner for EchoRunner {
        async fn execute(&self, command: &CommandSpec, _timeout: Duration) -> ExecutionResult {
            ExecutionResult::completed(0, command.to_shell_line().as_bytes(), b"")
        }
    }

    fn server() -> SecurityServer {
        SecurityServer::new(ToolContext::with_runner(
            Config::default(),
            Arc::new(EchoRunner),
        ))
    }

    fn first_text(result: &CallToolResult) -> String {
        let value = serde_json::to_value(result).unwrap();
        value["content"][0]["text"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_all_tools_registered() {
        let mut names = server().tool_names();
        names.sort();
        assert_eq!(
            names,
            vec![
                "custom_scan",
                "dirb_scan",
                "nikto_scan",
                "nmap_scan",
                "ping_sweep",
                "searchsploit_lookup",
                "sqlmap_test",
                "wpscan_test",
            ]
        );
    }

    #[test]
    fn test_server_info_enables_tools() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("authorized"));
    }

    #[tokio::test]
    async fn test_tool_call_returns_text() {
        let params = NmapParams {
            target: "scanme.nmap.org".to_string(),
            scan_type: "quick".to_string(),
            ..Default::default()
        };
        let result = server().nmap_scan(Parameters(params)).await.unwrap();
        assert_eq!(
            first_text(&result),
            "🔍 Nmap Scan Results for scanme.nmap.org:\n\nnmap -T3 -F scanme.nmap.org"
        );
        assert_ne!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_bad_input_is_still_success() {
        let result = server()
            .ping_sweep(Parameters(PingSweepParams::default()))
            .await
            .unwrap();
        assert_eq!(first_text(&result), "❌ Target cannot be empty");
        assert_ne!(result.is_error, Some(true));
    }
}
