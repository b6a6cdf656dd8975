//! Local daemon lifecycle.
//!
//! [`DaemonSupervisor`] starts `smileycoind` when no instance is running and
//! stops it again only if it was the one that launched it. A daemon that was
//! already running when the supervisor looked is never touched.
//!
//! Process access goes through [`ProcessHost`] so the ownership rules can be
//! exercised without real processes.

use parking_lot::Mutex;
use smiley_core::{ClientConfig, Result, SmileyError};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::{debug, info, warn};

/// How long `terminate` waits for the daemon to exit after SIGTERM.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);
const INITIAL_POLL_INTERVAL: Duration = Duration::from_millis(10);
const MAX_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A daemon process launched by a [`ProcessHost`].
pub trait DaemonProcess: Send {
    fn id(&self) -> u32;

    /// Ask the process to shut down gracefully and wait a bounded time for it to exit.
    fn terminate(&mut self) -> Result<()>;
}

/// Access to the host's process table.
pub trait ProcessHost: Send + Sync {
    /// Whether a process started from `program` is running.
    ///
    /// `program` may be a bare executable name or a path to one.
    fn is_running(&self, program: &str) -> Result<bool>;

    /// Launch `program` as a child process.
    fn spawn(&self, program: &str, args: &[String]) -> Result<Box<dyn DaemonProcess>>;
}

/// [`ProcessHost`] backed by the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl ProcessHost for SystemHost {
    fn is_running(&self, program: &str) -> Result<bool> {
        let name = process_name(program);
        let mut system = System::new();
        system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing(),
        );
        let found = system.processes_by_exact_name(name).next().is_some();
        debug!("looked for process {:?}: found={}", name, found);
        Ok(found)
    }

    fn spawn(&self, program: &str, args: &[String]) -> Result<Box<dyn DaemonProcess>> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SmileyError::Process(format!("failed to launch {}: {}", program, e)))?;
        Ok(Box::new(ChildDaemon { child }))
    }
}

/// Name the process table shows for `program`: its file name when a path is given.
fn process_name(program: &str) -> &OsStr {
    Path::new(program)
        .file_name()
        .unwrap_or_else(|| OsStr::new(program))
}

struct ChildDaemon {
    child: Child,
}

impl ChildDaemon {
    /// Poll until the child exits or `timeout` passes. Returns whether it exited.
    fn wait_for_exit(&mut self, timeout: Duration) -> Result<bool> {
        let start = Instant::now();
        let mut delay = INITIAL_POLL_INTERVAL;

        loop {
            if self.child.try_wait()?.is_some() {
                return Ok(true);
            }
            if start.elapsed() >= timeout {
                return Ok(false);
            }
            std::thread::sleep(delay);
            delay = (delay * 2).min(MAX_POLL_INTERVAL);
        }
    }
}

impl DaemonProcess for ChildDaemon {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn terminate(&mut self) -> Result<()> {
        if self.child.try_wait()?.is_some() {
            debug!("daemon {} already exited", self.child.id());
            return Ok(());
        }

        #[cfg(unix)]
        {
            let pid: libc::pid_t = self.child.id().try_into().map_err(|_| {
                SmileyError::Process(format!("pid {} out of range", self.child.id()))
            })?;
            let result = unsafe { libc::kill(pid, libc::SIGTERM) };
            if result != 0 {
                return Err(std::io::Error::last_os_error().into());
            }
        }

        #[cfg(not(unix))]
        self.child.kill()?;

        if !self.wait_for_exit(SHUTDOWN_TIMEOUT)? {
            warn!(
                "daemon {} still running {:?} after SIGTERM, not waiting any longer",
                self.child.id(),
                SHUTDOWN_TIMEOUT
            );
        }
        Ok(())
    }
}

#[derive(Default)]
struct ServerHandle {
    started: bool,
    handled_by_us: bool,
    process: Option<Box<dyn DaemonProcess>>,
}

/// Owns the lifecycle of a local daemon for one client.
///
/// Dropping the supervisor releases the daemon: when `shutdown_after_run` is
/// set, a daemon this supervisor launched is stopped; otherwise it is left
/// running.
pub struct DaemonSupervisor {
    host: Arc<dyn ProcessHost>,
    program: String,
    args: Vec<String>,
    should_start: bool,
    shutdown_after_run: bool,
    handle: Mutex<ServerHandle>,
}

impl DaemonSupervisor {
    /// Create a supervisor that manages real processes.
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_host(config, Arc::new(SystemHost))
    }

    pub fn with_host(config: &ClientConfig, host: Arc<dyn ProcessHost>) -> Self {
        Self {
            host,
            program: config.daemon_program.clone(),
            args: config.daemon_args.clone(),
            should_start: config.start_server,
            shutdown_after_run: config.shutdown_after_run,
            handle: Mutex::new(ServerHandle::default()),
        }
    }

    /// Make sure a daemon is running, launching one if needed.
    ///
    /// Does nothing if already started or if starting is disabled.
    pub fn start(&self) -> Result<()> {
        let mut handle = self.handle.lock();
        if handle.started || !self.should_start {
            return Ok(());
        }

        if self.host.is_running(&self.program)? {
            info!("{} already running, leaving it alone", self.program);
            handle.handled_by_us = false;
        } else {
            info!("{} not running, starting now", self.program);
            let process = self.host.spawn(&self.program, &self.args)?;
            debug!("launched {} with pid {}", self.program, process.id());
            handle.process = Some(process);
            handle.handled_by_us = true;
        }
        handle.started = true;
        Ok(())
    }

    /// Stop the daemon if this supervisor launched it.
    pub fn stop(&self) -> Result<()> {
        let mut handle = self.handle.lock();
        if !(handle.started && handle.handled_by_us) {
            return Ok(());
        }

        if let Some(process) = handle.process.as_mut() {
            info!("stopping {} (pid {})", self.program, process.id());
            process.terminate()?;
        }
        handle.process = None;
        handle.started = false;
        handle.handled_by_us = false;
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.handle.lock().started
    }

    /// Whether this supervisor launched the daemon and will stop it.
    pub fn handled_by_us(&self) -> bool {
        self.handle.lock().handled_by_us
    }

    /// Pid of the daemon this supervisor launched, if any.
    pub fn daemon_pid(&self) -> Option<u32> {
        self.handle.lock().process.as_ref().map(|p| p.id())
    }
}

impl Drop for DaemonSupervisor {
    fn drop(&mut self) {
        if self.shutdown_after_run {
            if let Err(e) = self.stop() {
                warn!("failed to stop {}: {}", self.program, e);
            }
        } else if let Some(pid) = self.daemon_pid() {
            info!("leaving {} (pid {}) running", self.program, pid);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockHost;
    use super::*;

    fn config(start: bool, shutdown: bool) -> ClientConfig {
        ClientConfig::new("u", "p", 14243)
            .with_start_server(start)
            .with_shutdown_after_run(shutdown)
    }

    #[test]
    fn test_start_spawns_when_not_running() {
        let host = Arc::new(MockHost::default());
        let supervisor = DaemonSupervisor::with_host(&config(true, true), host.clone());

        supervisor.start().unwrap();

        assert!(supervisor.is_started());
        assert!(supervisor.handled_by_us());
        assert_eq!(*host.spawned.lock(), vec!["smileycoind".to_string()]);
        assert_eq!(supervisor.daemon_pid(), Some(1000));
    }

    #[test]
    fn test_start_twice_spawns_once() {
        let host = Arc::new(MockHost::default());
        let supervisor = DaemonSupervisor::with_host(&config(true, true), host.clone());

        supervisor.start().unwrap();
        supervisor.start().unwrap();

        assert_eq!(host.spawned.lock().len(), 1);
        assert!(supervisor.handled_by_us());
    }

    #[test]
    fn test_existing_daemon_is_not_owned() {
        let host = Arc::new(MockHost::with_daemon_running());
        let supervisor = DaemonSupervisor::with_host(&config(true, true), host.clone());

        supervisor.start().unwrap();
        assert!(supervisor.is_started());
        assert!(!supervisor.handled_by_us());
        assert!(host.spawned.lock().is_empty());

        supervisor.stop().unwrap();
        drop(supervisor);
        assert!(host.terminated.lock().is_empty());
    }

    #[test]
    fn test_stop_terminates_owned_daemon_once() {
        let host = Arc::new(MockHost::default());
        let supervisor = DaemonSupervisor::with_host(&config(true, true), host.clone());

        supervisor.start().unwrap();
        supervisor.stop().unwrap();
        supervisor.stop().unwrap();

        assert_eq!(*host.terminated.lock(), vec![1000]);
        assert!(!supervisor.is_started());
        assert!(!supervisor.handled_by_us());
        assert_eq!(supervisor.daemon_pid(), None);
    }

    #[test]
    fn test_stop_before_start_is_noop() {
        let host = Arc::new(MockHost::default());
        let supervisor = DaemonSupervisor::with_host(&config(true, true), host.clone());

        supervisor.stop().unwrap();
        assert!(!supervisor.is_started());
        assert!(host.terminated.lock().is_empty());
    }

    #[test]
    fn test_start_disabled_does_nothing() {
        let host = Arc::new(MockHost::default());
        let supervisor = DaemonSupervisor::with_host(&config(false, true), host.clone());

        supervisor.start().unwrap();
        assert!(!supervisor.is_started());
        assert!(host.spawned.lock().is_empty());
    }

    #[test]
    fn test_drop_stops_owned_daemon() {
        let host = Arc::new(MockHost::default());
        let supervisor = DaemonSupervisor::with_host(&config(true, true), host.clone());
        supervisor.start().unwrap();

        drop(supervisor);
        assert_eq!(*host.terminated.lock(), vec![1000]);
    }

    #[test]
    fn test_drop_leaves_daemon_running_without_shutdown_after_run() {
        let host = Arc::new(MockHost::default());
        let supervisor = DaemonSupervisor::with_host(&config(true, false), host.clone());
        supervisor.start().unwrap();

        drop(supervisor);
        assert!(host.terminated.lock().is_empty());
    }

    #[test]
    fn test_explicit_stop_ignores_shutdown_after_run() {
        let host = Arc::new(MockHost::default());
        let supervisor = DaemonSupervisor::with_host(&config(true, false), host.clone());
        supervisor.start().unwrap();

        supervisor.stop().unwrap();
        assert_eq!(*host.terminated.lock(), vec![1000]);
    }

    #[test]
    fn test_failed_terminate_keeps_ownership() {
        let host = Arc::new(MockHost::default());
        *host.fail_terminate.lock() = true;
        let supervisor = DaemonSupervisor::with_host(&config(true, false), host.clone());
        supervisor.start().unwrap();

        assert!(matches!(supervisor.stop(), Err(SmileyError::Process(_))));
        assert!(supervisor.is_started());
        assert!(supervisor.handled_by_us());
    }
}

#[cfg(all(test, unix))]
mod system_tests {
    use super::*;

    fn pid_alive(pid: u32) -> bool {
        unsafe { libc::kill(pid as libc::pid_t, 0) == 0 }
    }

    #[test]
    fn test_process_name_strips_directories() {
        assert_eq!(process_name("/usr/local/bin/smileycoind"), OsStr::new("smileycoind"));
        assert_eq!(process_name("smileycoind"), OsStr::new("smileycoind"));
    }

    #[test]
    fn test_system_host_finds_spawned_process_by_name_and_path() {
        let host = SystemHost;
        let mut daemon = host.spawn("sleep", &["30".to_string()]).unwrap();

        assert!(host.is_running("sleep").unwrap());
        assert!(host.is_running("/opt/elsewhere/bin/sleep").unwrap());
        assert!(!host.is_running("smiley-no-such-daemon").unwrap());

        daemon.terminate().unwrap();
    }

    #[test]
    fn test_terminate_signals_and_reaps_child() {
        let mut daemon = SystemHost.spawn("sleep", &["30".to_string()]).unwrap();
        let pid = daemon.id();
        assert!(pid_alive(pid));

        daemon.terminate().unwrap();

        // reaped, so the pid no longer exists
        assert!(!pid_alive(pid));
    }

    #[test]
    fn test_terminate_after_exit_is_ok() {
        let child = Command::new("true").spawn().unwrap();
        let mut daemon = ChildDaemon { child };
        assert!(daemon.wait_for_exit(Duration::from_secs(5)).unwrap());

        daemon.terminate().unwrap();
    }

    #[test]
    fn test_wait_for_exit_gives_up_after_timeout() {
        let child = Command::new("sleep").arg("30").spawn().unwrap();
        let mut daemon = ChildDaemon { child };

        assert!(!daemon.wait_for_exit(Duration::from_millis(50)).unwrap());
        daemon.terminate().unwrap();
    }

    #[test]
    fn test_running_daemon_configured_by_path_is_not_spawned_again() {
        let mut existing = Command::new("sleep").arg("30").spawn().unwrap();

        // the path does not exist, so spawning it would fail
        let config = ClientConfig::new("u", "p", 14243)
            .with_start_server(true)
            .with_daemon("/nonexistent/smiley/bin/sleep", Vec::new());
        let supervisor = DaemonSupervisor::new(&config);

        supervisor.start().unwrap();
        assert!(supervisor.is_started());
        assert!(!supervisor.handled_by_us());
        assert_eq!(supervisor.daemon_pid(), None);

        drop(supervisor);
        assert!(existing.try_wait().unwrap().is_none());
        existing.kill().unwrap();
        existing.wait().unwrap();
    }
}
