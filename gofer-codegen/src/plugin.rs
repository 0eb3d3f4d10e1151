//! The generation harness.
//!
//! A [`Plugin`] owns every file of one run. Files are finalized together and
//! nothing is written unless all of them succeed. The external formatter
//! runs last, and its absence only produces a warning.

use std::path::PathBuf;

use indexmap::IndexMap;

use crate::{
    config::Config,
    diagnostic::Diagnostic,
    error::Result,
    file::GeneratedFile,
    formatter::ExternalFormatter,
    output::OutputWriter,
    package::Package,
    registry::PackageRegistry,
    stdlib::StandardLibrary,
};

/// The outcome of [`Plugin::output`].
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Paths written, in creation order.
    pub written: Vec<PathBuf>,
    /// Whether the external formatter ran over the Go files.
    pub formatted: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunSummary {
    pub fn has_warnings(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity.is_warning())
    }
}

pub struct Plugin {
    config: Config,
    stdlib: StandardLibrary,
    files: IndexMap<PathBuf, GeneratedFile>,
}

impl Plugin {
    /// Create a plugin, locating the standard library from `config`.
    pub fn new(config: Config) -> Self {
        let stdlib = StandardLibrary::detect(config.goroot.as_deref());
        Self::with_stdlib(config, stdlib)
    }

    pub fn with_stdlib(config: Config, stdlib: StandardLibrary) -> Self {
        Self {
            config,
            stdlib,
            files: IndexMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stdlib(&self) -> &StandardLibrary {
        &self.stdlib
    }

    /// Start a new output file, or return the one already created at
    /// `directory/filename`.
    ///
    /// `packages` are registered immediately, fixing their aliases before
    /// any identifier is written. Go files start with the configured header.
    pub fn new_file(
        &mut self,
        filename: &str,
        directory: impl Into<PathBuf>,
        packages: &[Package],
    ) -> &mut GeneratedFile {
        let directory = directory.into();
        let key = directory.join(filename);
        let registry = PackageRegistry::with_policy(self.stdlib.clone(), self.config.alias_policy);
        let header = self.config.header().map(str::to_string);

        let file = self.files.entry(key).or_insert_with(|| {
            let mut file = GeneratedFile::new(filename, directory, registry);
            if let Some(header) = header.filter(|_| file.is_go_source()) {
                file.write(["// ", header.as_str()]);
                file.newline();
            }
            file
        });
        file.import(packages);
        file
    }

    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.values()
    }

    /// Finalize every file, stopping at the first failure.
    pub fn render(&self) -> Result<Vec<(&GeneratedFile, Vec<u8>)>> {
        self.files
            .values()
            .map(|file| file.content().map(|bytes| (file, bytes)))
            .collect()
    }

    /// Finalize, persist and format every file.
    pub fn output(
        &self,
        writer: &mut dyn OutputWriter,
        formatter: Option<&dyn ExternalFormatter>,
    ) -> Result<RunSummary> {
        let rendered = self.render()?;

        let mut summary = RunSummary::default();
        let mut go_files = Vec::new();
        for (file, bytes) in rendered {
            let path = writer.write(file.directory(), file.filename(), &bytes)?;
            if file.is_go_source() {
                go_files.push(path.clone());
            }
            summary.written.push(path);
        }
        summary.diagnostics.push(Diagnostic::info(
            "write",
            format!("wrote {} files", summary.written.len()),
        ));

        let Some(formatter) = formatter.filter(|_| !go_files.is_empty()) else {
            return Ok(summary);
        };
        if !formatter.is_available() {
            summary.diagnostics.push(unavailable(formatter));
            return Ok(summary);
        }
        match formatter.format(&go_files) {
            Ok(()) => {
                summary.formatted = true;
                summary.diagnostics.push(Diagnostic::info(
                    "format",
                    format!("formatted {} files with {}", go_files.len(), formatter.name()),
                ));
            }
            Err(err) if err.is_recoverable() => summary.diagnostics.push(unavailable(formatter)),
            Err(err) => return Err(err),
        }
        Ok(summary)
    }
}

fn unavailable(formatter: &dyn ExternalFormatter) -> Diagnostic {
    tracing::warn!(tool = formatter.name(), "formatter unavailable, output left as printed");
    Diagnostic::warning("format", format!("{} is not available", formatter.name()))
        .with_help(formatter.remediation())
}

/// Run a generator: build files with `generate`, then write them below the
/// current directory and format them as configured.
///
/// ```no_run
/// use gofer_codegen::{Config, GoIdent, Package, fragments, run};
///
/// run(Config::default(), |plugin| {
///     let println = GoIdent::new("fmt", "Println");
///     let file = plugin.new_file("main.go", "cmd/hello", &[Package::new("fmt")]);
///     file.write(["package main"]);
///     file.write(["func main() {"]);
///     file.write(fragments!["\t", &println, "(\"hello\")"]);
///     file.write(["}"]);
///     Ok(())
/// })?;
/// # Ok::<(), eyre::Report>(())
/// ```
pub fn run<F>(config: Config, generate: F) -> eyre::Result<RunSummary>
where
    F: FnOnce(&mut Plugin) -> eyre::Result<()>,
{
    let mut plugin = Plugin::new(config);
    generate(&mut plugin)?;

    let mut writer = crate::output::FsWriter::new(".");
    let formatter = crate::formatter::CommandFormatter::from_config(&plugin.config.formatter);
    let formatter = plugin
        .config
        .formatter
        .enabled
        .then_some(&formatter as &dyn ExternalFormatter);

    let summary = plugin
        .output(&mut writer, formatter)
        .map_err(|err| eyre::Report::new(*err))?;
    for diagnostic in &summary.diagnostics {
        if diagnostic.severity.is_warning() {
            tracing::warn!(stage = %diagnostic.stage, "{diagnostic}");
        } else {
            tracing::info!(stage = %diagnostic.stage, "{diagnostic}");
        }
    }
    Ok(summary)
}
