#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use security_mcp::config::Config;
    use security_mcp::external::custom::CustomScanParams;
    use security_mcp::external::dirb::DirbParams;
    use security_mcp::external::nmap::NmapParams;
    use security_mcp::external::ping::PingSweepParams;
    use security_mcp::external::searchsploit::SearchsploitParams;
    use security_mcp::external::wpscan::WpscanParams;
    use security_mcp::external::{CommandRunner, CommandSpec, ExecutionResult, ShellRunner};
    use security_mcp::handlers::{self, ToolContext};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingRunner {
        commands: Mutex<Vec<(String, Duration)>>,
    }

    impl RecordingRunner {
        fn commands(&self) -> Vec<String> {
            self.commands
                .lock()
                .unwrap()
                .iter()
                .map(|(line, _)| line.clone())
                .collect()
        }

        fn timeouts(&self) -> Vec<Duration> {
            self.commands
                .lock()
                .unwrap()
                .iter()
                .map(|(_, timeout)| *timeout)
                .collect()
        }
    }

    #[async_trait]
    impl CommandRunner for RecordingRunner {
        async fn execute(&self, command: &CommandSpec, timeout: Duration) -> ExecutionResult {
            self.commands
                .lock()
                .unwrap()
                .push((command.to_shell_line(), timeout));
            ExecutionResult::completed(0, b"", b"")
        }
    }

    fn recording(config: Config) -> (ToolContext, Arc<RecordingRunner>) {
        let runner = Arc::new(RecordingRunner::default());
        (ToolContext::with_runner(config, runner.clone()), runner)
    }

    fn dirb(threads: &str) -> DirbParams {
        DirbParams {
            target: "example.com".to_string(),
            threads: threads.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_dirb_thread_clamp() {
        let (ctx, runner) = recording(Config::default());

        handlers::dirb_scan(&ctx, dirb("5")).await;
        handlers::dirb_scan(&ctx, dirb("999")).await;
        handlers::dirb_scan(&ctx, dirb("abc")).await;

        let wordlist = "/usr/share/dirb/wordlists/common.txt";
        assert_eq!(
            runner.commands(),
            vec![
                format!("dirb http://example.com {} -z 5", wordlist),
                format!("dirb http://example.com {} -z 10", wordlist),
                format!("dirb http://example.com {}", wordlist),
            ]
        );
    }

    #[tokio::test]
    async fn test_dirb_clamp_follows_config() {
        let config = Config {
            max_threads: 3,
            ..Config::default()
        };
        let (ctx, runner) = recording(config);

        handlers::dirb_scan(&ctx, dirb("8")).await;
        assert!(runner.commands()[0].ends_with(" -z 3"));
    }

    #[tokio::test]
    async fn test_ping_sweep_command_choice() {
        let (ctx, runner) = recording(Config::default());

        handlers::ping_sweep(
            &ctx,
            PingSweepParams {
                target_range: "10.0.0.0/24".to_string(),
                count: "5".to_string(),
            },
        )
        .await;
        handlers::ping_sweep(
            &ctx,
            PingSweepParams {
                target_range: "10.0.0.5".to_string(),
                count: "20".to_string(),
            },
        )
        .await;

        assert_eq!(
            runner.commands(),
            vec!["nmap -sn 10.0.0.0/24", "ping -c 10 10.0.0.5"]
        );
        assert_eq!(runner.timeouts(), vec![Duration::from_secs(60); 2]);
    }

    #[tokio::test]
    async fn test_disallowed_custom_tool_spawns_nothing() {
        let (ctx, runner) = recording(Config::default());

        let text = handlers::custom_scan(
            &ctx,
            CustomScanParams {
                tool: "ssh".to_string(),
                target: "10.0.0.1".to_string(),
                options: String::new(),
            },
        )
        .await;

        assert_eq!(
            text,
            "❌ Error: Tool 'ssh' not in allowed list: nmap, nikto, sqlmap, wpscan, dirb, curl, wget, nc, telnet"
        );
        assert!(runner.commands().is_empty());
    }

    #[tokio::test]
    async fn test_injection_attempts_spawn_nothing() {
        let (ctx, runner) = recording(Config::default());

        let text = handlers::nmap_scan(
            &ctx,
            NmapParams {
                target: "127.0.0.1; rm -rf /".to_string(),
                ..Default::default()
            },
        )
        .await;
        assert_eq!(text, "❌ Invalid character ';' in target");

        let text = handlers::wpscan_test(
            &ctx,
            WpscanParams {
                target: "blog`id`".to_string(),
                ..Default::default()
            },
        )
        .await;
        assert_eq!(text, "❌ Invalid character '`' in target");

        let text = handlers::searchsploit_lookup(
            &ctx,
            SearchsploitParams {
                search_term: "   ".to_string(),
                ..Default::default()
            },
        )
        .await;
        assert_eq!(text, "❌ Error: Search term is required");

        assert!(runner.commands().is_empty());
    }

    #[tokio::test]
    async fn test_configured_defaults_reach_commands() {
        let config = Config {
            scan_timeout: Duration::from_secs(42),
            default_intensity: "T5".to_string(),
            ..Config::default()
        };
        let (ctx, runner) = recording(config);

        handlers::nmap_scan(
            &ctx,
            NmapParams {
                target: "host".to_string(),
                ..Default::default()
            },
        )
        .await;
        handlers::searchsploit_lookup(
            &ctx,
            SearchsploitParams {
                search_term: "samba".to_string(),
                ..Default::default()
            },
        )
        .await;

        assert_eq!(runner.commands(), vec!["nmap -T5 host", "searchsploit samba"]);
        assert_eq!(
            runner.timeouts(),
            vec![Duration::from_secs(42), Duration::from_secs(30)]
        );
    }

    #[tokio::test]
    async fn test_custom_scan_through_real_shell() {
        let ctx = ToolContext::with_runner(
            Config::default(),
            Arc::new(ShellRunner::new().with_grace_period(Duration::from_millis(500))),
        );

        // curl may be missing; the combined output still carries the heading
        let text = handlers::custom_scan(
            &ctx,
            CustomScanParams {
                tool: "curl".to_string(),
                target: "http://127.0.0.1:9".to_string(),
                options: "-s --max-time 2".to_string(),
            },
        )
        .await;
        assert!(text.starts_with("⚡ Custom curl execution:\n\n"));
    }

    #[cfg(target_os = "linux")]
    mod cancellation {
        use super::*;
        use nix::sys::signal::kill;
        use nix::unistd::Pid;
        use std::path::{Path, PathBuf};

        /// Runs a long sleep that records its pid, whatever command it is given
        struct SleepingRunner {
            inner: ShellRunner,
            pid_file: PathBuf,
        }

        #[async_trait]
        impl CommandRunner for SleepingRunner {
            async fn execute(&self, _command: &CommandSpec, timeout: Duration) -> ExecutionResult {
                let sleeper = CommandSpec::new("echo")
                    .args(["$$", ">"])
                    .arg(self.pid_file.display().to_string())
                    .args([";", "exec", "sleep", "30"]);
                self.inner.execute(&sleeper, timeout).await
            }
        }

        fn is_running(pid: i32) -> bool {
            if kill(Pid::from_raw(pid), None).is_err() {
                return false;
            }
            match std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
                Ok(stat) => stat
                    .rsplit(')')
                    .next()
                    .map(|rest| !rest.trim_start().starts_with('Z'))
                    .unwrap_or(true),
                Err(_) => false,
            }
        }

        async fn read_pid(path: &Path) -> i32 {
            loop {
                if let Ok(text) = std::fs::read_to_string(path) {
                    if let Ok(pid) = text.trim().parse() {
                        return pid;
                    }
                }
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
        }

        async fn wait_until_gone(pid: i32) -> bool {
            for _ in 0..40 {
                if !is_running(pid) {
                    return true;
                }
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            false
        }

        #[tokio::test]
        async fn test_cancelled_call_kills_its_child() {
            let dir = tempfile::tempdir().unwrap();
            let pid_file = dir.path().join("pid");
            let runner = SleepingRunner {
                inner: ShellRunner::new(),
                pid_file: pid_file.clone(),
            };
            let ctx = ToolContext::with_runner(Config::default(), Arc::new(runner));

            let mut call = Box::pin(handlers::nmap_scan(
                &ctx,
                NmapParams {
                    target: "host".to_string(),
                    ..Default::default()
                },
            ));

            let pid = tokio::time::timeout(Duration::from_secs(5), async {
                tokio::select! {
                    pid = read_pid(&pid_file) => pid,
                    text = &mut call => panic!("call finished early: {}", text),
                }
            })
            .await
            .unwrap();
            assert!(is_running(pid));

            drop(call);
            assert!(wait_until_gone(pid).await, "child {} outlived its call", pid);
        }
    }
}
