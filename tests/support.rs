use std::ffi::OsStr;
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Report captured from `httperf` against a local nginx.
pub const SAMPLE_REPORT: &str = "httperf --hog --client=0/1 --server=localhost --port=8080 --uri=/ --rate=10 --send-buffer=4096 --recv-buffer=16384 --num-conns=100 --num-calls=1
Maximum connect burst length: 1

Total: connections 100 requests 100 replies 100 test-duration 9.902 s

Connection rate: 10.1 conn/s (99.0 ms/conn, <=2 concurrent connections)
Connection time [ms]: min 0.4 avg 0.7 max 3.1 median 0.5 stddev 0.4
Connection time [ms]: connect 0.1
Connection length [replies/conn]: 1.000

Request rate: 10.1 req/s (99.0 ms/req)
Request size [B]: 62.0

Reply rate [replies/s]: min 10.0 avg 10.0 max 10.0 stddev 0.0 (1 samples)
Reply time [ms]: response 0.5 transfer 0.0
Reply size [B]: header 214.0 content 612.0 footer 0.0 (total 826.0)
Reply status: 1xx=0 2xx=100 3xx=0 4xx=0 5xx=0

CPU time [s]: user 2.61 system 7.27 (user 26.4% system 73.4% total 99.8%)
Net I/O: 8.8 KB/s (0.1*10^6 bps)

Errors: total 0 client-timo 0 socket-timo 0 connrefused 0 connreset 0
Errors: fd-unavail 0 addrunavail 0 ftab-full 0 other 0
";

/// Kills a background `swarmperf` process when dropped.
pub struct ProcessGuard {
    child: Child,
}

impl Drop for ProcessGuard {
    fn drop(&mut self) {
        drop(self.child.kill());
        drop(self.child.wait());
    }
}

/// Runs `swarmperf` to completion inside `dir`.
///
/// # Errors
///
/// Returns an error if the binary is unavailable or cannot be run.
pub fn run_swarmperf<I, S>(dir: &Path, args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = swarmperf_bin()?;
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env("SWARMPERF_LOG", "error")
        .env_remove("NO_COLOR")
        .output()
        .map_err(|err| format!("run swarmperf failed: {}", err))
}

/// Starts `swarmperf` in the background inside `dir`.
///
/// # Errors
///
/// Returns an error if the binary is unavailable or cannot be spawned.
pub fn spawn_swarmperf<I, S>(dir: &Path, args: I) -> Result<ProcessGuard, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = swarmperf_bin()?;
    let child = Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env("SWARMPERF_LOG", "error")
        .env_remove("NO_COLOR")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|err| format!("spawn swarmperf failed: {}", err))?;
    Ok(ProcessGuard { child })
}

/// Picks a port that is free right now.
///
/// # Errors
///
/// Returns an error if no local port can be bound.
pub fn allocate_port() -> Result<u16, String> {
    let listener =
        TcpListener::bind("127.0.0.1:0").map_err(|err| format!("bind port failed: {}", err))?;
    listener
        .local_addr()
        .map(|addr| addr.port())
        .map_err(|err| format!("local addr failed: {}", err))
}

/// Waits until something accepts connections on `addr`.
///
/// # Errors
///
/// Returns an error if `addr` is not reachable within `timeout`.
pub fn wait_for_listener(addr: &str, timeout: Duration) -> Result<(), String> {
    let started = Instant::now();
    while started.elapsed() < timeout {
        if TcpStream::connect(addr).is_ok() {
            return Ok(());
        }
        thread::sleep(Duration::from_millis(50));
    }
    Err(format!("{} did not start listening", addr))
}

fn swarmperf_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_swarmperf").map_or_else(
        || Err("CARGO_BIN_EXE_swarmperf missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
