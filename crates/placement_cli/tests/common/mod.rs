use std::path::PathBuf;

use assert_cmd::Command;
use predicates::function::{function, FnPredicate};
use tempfile::{tempdir, TempDir};

/// A data directory for a test, removed when the context is dropped.
#[derive(Debug)]
pub struct Context {
    pub temp_dir: TempDir,
    pub trace_log_path: PathBuf,
}

impl Context {
    pub fn new() -> Self {
        let temp_dir = tempdir().unwrap();
        let trace_log_path = temp_dir.path().join("trace.log");

        Self {
            temp_dir,
            trace_log_path,
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    /// A command using the context's data directory, unaffected by the environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
        cmd.env_remove("PLACEMENT_DATA_DIR")
            .env_remove("RUST_LOG")
            .arg("--data-dir")
            .arg(self.temp_dir.path());
        cmd
    }

    /// Run the command, which must succeed, and return stdout
    pub fn run(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .unwrap();

        let stdout = String::from_utf8(output.stdout).unwrap();
        println!("args: {:?}\nstdout:\n{}", args, stdout);
        println!("stderr:\n{}", String::from_utf8_lossy(&output.stderr));
        assert!(output.status.success());

        stdout
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        println!(
            "destroying context. temp_dir: {}",
            self.temp_dir.path().display()
        );
    }
}

pub fn print(label: &'static str) -> FnPredicate<impl Fn(&[u8]) -> bool, [u8]> {
    function(move |content: &[u8]| {
        println!("{}:\n{}", label, String::from_utf8_lossy(content));
        true
    })
}

/// The id from a line such as `Added measurement. id: <ID>`
pub fn id_from_output(output: &str, prefix: &str) -> String {
    output
        .lines()
        .find_map(|line| line.strip_prefix(prefix))
        .unwrap()
        .trim()
        .to_string()
}
