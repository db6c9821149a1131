//! Build script for unzipall: stamps the git commit into dev versions.
//!
//! `cli::VERSION` reads `VERGEN_GIT_SHA` unless the `release` feature is on,
//! in which case nothing is emitted and the plain crate version is used.

fn main() {
    #[cfg(not(feature = "release"))]
    emit_git_sha();
}

#[cfg(not(feature = "release"))]
fn emit_git_sha() {
    use vergen_gitcl::{Emitter, GitclBuilder};

    let emitted = GitclBuilder::default()
        .sha(true)
        .build()
        .map_err(|e| e.to_string())
        .and_then(|git| {
            Emitter::default()
                .add_instructions(&git)
                .and_then(|emitter| emitter.emit())
                .map_err(|e| e.to_string())
        });

    // Outside a git checkout the version still needs a value
    if let Err(e) = emitted {
        println!("cargo:warning=git SHA unavailable: {}", e);
        println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
    }
}
