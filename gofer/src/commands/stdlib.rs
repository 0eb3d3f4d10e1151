use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use gofer_codegen::{Config, StandardLibrary};

use super::UnwrapOrExit;

#[derive(Args)]
pub struct StdCommand {
    /// Import paths to classify
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// GOROOT to read the standard library from (overrides detection)
    #[arg(long)]
    pub goroot: Option<PathBuf>,

    /// Path to a gofer.toml whose `goroot` setting is used
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl StdCommand {
    pub fn run(&self) -> Result<()> {
        let stdlib = self.stdlib();
        for line in classify(&stdlib, &self.paths) {
            println!("{line}");
        }
        Ok(())
    }

    fn stdlib(&self) -> StandardLibrary {
        let config = match &self.config {
            Some(path) => Config::load(path).unwrap_or_exit(),
            None => Config::default(),
        };
        let goroot = self.goroot.as_deref().or(config.goroot.as_deref());
        StandardLibrary::detect(goroot)
    }
}

fn classify<'a>(stdlib: &'a StandardLibrary, paths: &'a [String]) -> impl Iterator<Item = String> + 'a {
    paths.iter().map(|path| {
        let kind = if stdlib.is_standard(path) {
            "standard"
        } else {
            "external"
        };
        format!("{path}: {kind}")
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_classify() {
        let stdlib = StandardLibrary::from_roots(["fmt", "net"]);
        let paths = vec!["net/http".to_string(), "example.com/x".to_string()];
        let lines: Vec<_> = classify(&stdlib, &paths).collect();
        assert_eq!(lines, vec!["net/http: standard", "example.com/x: external"]);
    }

    #[test]
    fn test_goroot_from_config() {
        let temp = TempDir::new().unwrap();
        let goroot = temp.path().join("go");
        std::fs::create_dir_all(goroot.join("src/strings")).unwrap();
        let config = temp.path().join("gofer.toml");
        std::fs::write(&config, format!("goroot = {:?}\n", goroot.display().to_string())).unwrap();

        let cmd = StdCommand {
            paths: vec!["strings".to_string()],
            goroot: None,
            config: Some(config),
        };
        assert!(cmd.stdlib().is_standard("strings"));
    }

    #[test]
    fn test_flag_overrides_config() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("src/bytes")).unwrap();

        let cmd = StdCommand {
            paths: vec![],
            goroot: Some(temp.path().to_path_buf()),
            config: None,
        };
        assert!(cmd.stdlib().is_standard("bytes"));
    }
}
