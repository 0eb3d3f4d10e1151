//! Import synthesis and canonical reformatting of finished files.

use gofer_syntax::{ImportDecl, ImportSpec, Printer, Style};

use crate::{
    error::{Error, Result},
    file::GeneratedFile,
};

/// Produce the final bytes of `file`.
///
/// Files that are not Go source are returned unchanged. Go files are parsed,
/// given one grouped import declaration for every registered package
/// (standard library first, then by path) and reprinted with [`Style::GO`].
pub fn finalize(file: &GeneratedFile) -> Result<Vec<u8>> {
    if !file.is_go_source() {
        return Ok(file.buffer().as_bytes().to_vec());
    }

    let src = file.buffer();
    let mut source =
        gofer_syntax::parse(src).map_err(|err| Error::syntax(&err, src, file.filename()))?;

    let packages = file.registry().sorted();
    if !packages.is_empty() {
        let specs = packages.iter().map(|package| {
            if package.needs_explicit_alias() {
                ImportSpec::named(package.alias(), package.path())
            } else {
                ImportSpec::new(package.path())
            }
        });
        source.insert_import_decl(ImportDecl::grouped(specs));
    }

    tracing::debug!(
        file = file.filename(),
        imports = packages.len(),
        "finalized generated file"
    );
    Ok(Printer::new(Style::GO).print(&source).into_bytes())
}
