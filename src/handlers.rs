//! # Operation Handlers
//!
//! One async function per exposed tool. Each handler validates its
//! parameters, composes a command, runs it through the context's
//! [`CommandRunner`] and formats the outcome as display text. Handlers never
//! fail: input problems and execution failures both come back as a string
//! starting with the failure marker.
//!
//! Two output modes exist. *Gated* tools (nmap, nikto, dirb, searchsploit)
//! show stdout on exit status 0 and stderr otherwise. *Combined* tools
//! (sqlmap, wpscan, ping sweep, custom) show stdout followed by stderr
//! whatever the exit status.

use crate::config::Config;
use crate::constants::markers;
use crate::error::Result;
use crate::external::custom::CustomScanParams;
use crate::external::dirb::DirbParams;
use crate::external::nikto::NiktoParams;
use crate::external::nmap::NmapParams;
use crate::external::ping::PingSweepParams;
use crate::external::searchsploit::SearchsploitParams;
use crate::external::sqlmap::SqlmapParams;
use crate::external::wpscan::WpscanParams;
use crate::external::{CommandRunner, ExecutionResult, PreparedScan, ShellRunner};
use crate::logging;
use std::future::Future;
use std::sync::Arc;
use tokio_util::task::AbortOnDropHandle;
use tracing::{debug, error, info, Instrument};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct ToolContext {
    config: Arc<Config>,
    runner: Arc<dyn CommandRunner>,
}

impl ToolContext {
    /// Context backed by the real `sh -c` executor
    pub fn new(config: Config) -> Self {
        Self::with_runner(config, Arc::new(ShellRunner::new()))
    }

    pub fn with_runner(config: Config, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            config: Arc::new(config),
            runner,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn run(&self, scan: &PreparedScan) -> ExecutionResult {
        info!(
            command = %scan.command,
            timeout_secs = scan.timeout.as_secs_f64(),
            "Executing {}",
            scan.command.program()
        );
        self.runner.execute(&scan.command, scan.timeout).await
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// stdout under the heading on exit 0, stderr under the failure line otherwise
fn gated(result: &ExecutionResult, heading: String, failure: &str) -> String {
    if result.exit_code == 0 {
        format!("{}\n\n{}", heading, result.stdout)
    } else {
        format!("{} {}:\n{}", markers::FAILURE, failure, result.stderr)
    }
}

fn combined(result: &ExecutionResult, heading: String) -> String {
    format!("{}\n\n{}", heading, result.combined_output())
}

/// Runs `work` on its own task inside a tool span and turns every failure
/// into display text.
///
/// The task is aborted if the returned future is dropped, which drops the
/// runner call and kills the child's process group with it.
async fn respond<F, Fut>(ctx: &ToolContext, tool: &'static str, target: &str, work: F) -> String
where
    F: FnOnce(ToolContext) -> Fut + Send + 'static,
    Fut: Future<Output = Result<String>> + Send + 'static,
{
    let span = logging::tool_span(tool, target);
    let ctx = ctx.clone();

    let task = AbortOnDropHandle::new(tokio::spawn(
        async move { work(ctx).await }.instrument(span),
    ));

    match task.await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            debug!(tool, error = %e, "Rejected tool input");
            format!("{} {}", markers::FAILURE, e.user_message())
        }
        Err(e) => {
            error!(tool, error = %e, "Handler task failed");
            format!("{} Error: internal handler failure", markers::FAILURE)
        }
    }
}

pub async fn nmap_scan(ctx: &ToolContext, params: NmapParams) -> String {
    let target = params.target.clone();
    respond(ctx, "nmap_scan", &target, move |ctx| async move {
        let scan = params.prepare(ctx.config())?;
        let result = ctx.run(&scan).await;
        Ok(gated(
            &result,
            format!("{} Nmap Scan Results for {}:", markers::NMAP, scan.target),
            "Nmap scan failed",
        ))
    })
    .await
}

pub async fn nikto_scan(ctx: &ToolContext, params: NiktoParams) -> String {
    let target = params.target.clone();
    respond(ctx, "nikto_scan", &target, move |ctx| async move {
        let scan = params.prepare(ctx.config())?;
        let result = ctx.run(&scan).await;
        Ok(gated(
            &result,
            format!("{} Nikto Vulnerability Scan for {}:", markers::NIKTO, scan.target),
            "Nikto scan failed",
        ))
    })
    .await
}

pub async fn sqlmap_test(ctx: &ToolContext, params: SqlmapParams) -> String {
    let target = params.target.clone();
    respond(ctx, "sqlmap_test", &target, move |ctx| async move {
        let scan = params.prepare(ctx.config())?;
        let result = ctx.run(&scan).await;
        Ok(combined(
            &result,
            format!("{} SQLMap Test Results for {}:", markers::SQLMAP, scan.target),
        ))
    })
    .await
}

pub async fn wpscan_test(ctx: &ToolContext, params: WpscanParams) -> String {
    let target = params.target.clone();
    respond(ctx, "wpscan_test", &target, move |ctx| async move {
        let scan = params.prepare(ctx.config())?;
        let result = ctx.run(&scan).await;
        Ok(combined(
            &result,
            format!("{} WPScan Results for {}:", markers::WPSCAN, scan.target),
        ))
    })
    .await
}

pub async fn dirb_scan(ctx: &ToolContext, params: DirbParams) -> String {
    let target = params.target.clone();
    respond(ctx, "dirb_scan", &target, move |ctx| async move {
        let scan = params.prepare(ctx.config())?;
        let result = ctx.run(&scan).await;
        Ok(gated(
            &result,
            format!("{} DIRB Directory Scan for {}:", markers::DIRB, scan.target),
            "DIRB scan failed",
        ))
    })
    .await
}

pub async fn searchsploit_lookup(ctx: &ToolContext, params: SearchsploitParams) -> String {
    let term = params.search_term.clone();
    respond(ctx, "searchsploit_lookup", &term, move |ctx| async move {
        let scan = params.prepare()?;
        let result = ctx.run(&scan).await;
        Ok(gated(
            &result,
            format!(
                "{} Exploit Database Search for '{}':",
                markers::SEARCHSPLOIT,
                scan.target
            ),
            "Searchsploit lookup failed",
        ))
    })
    .await
}

pub async fn ping_sweep(ctx: &ToolContext, params: PingSweepParams) -> String {
    let target = params.target_range.clone();
    respond(ctx, "ping_sweep", &target, move |ctx| async move {
        let scan = params.prepare()?;
        let result = ctx.run(&scan).await;
        Ok(combined(
            &result,
            format!("{} Network Discovery for {}:", markers::DISCOVERY, scan.target),
        ))
    })
    .await
}

pub async fn custom_scan(ctx: &ToolContext, params: CustomScanParams) -> String {
    let target = params.target.clone();
    respond(ctx, "custom_scan", &target, move |ctx| async move {
        let scan = params.prepare(ctx.config())?;
        let result = ctx.run(&scan).await;
        Ok(combined(
            &result,
            format!(
                "{} Custom {} execution:",
                markers::CUSTOM,
                scan.command.program()
            ),
        ))
    })
    .await
}
