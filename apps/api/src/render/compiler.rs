//! External LaTeX compiler invocation.
//!
//! Each compile run owns a fresh temporary working directory holding the
//! assembled markup plus every static fragment. The directory is removed on
//! every exit path — success, compiler failure, timeout, panic, or request
//! cancellation — via `TempDir`'s Drop and `kill_on_drop` on the subprocess.

use std::path::{Path, PathBuf};
use std::time::Duration;

use bytes::Bytes;
use tokio::process::Command;
use tracing::error;

use crate::errors::AppError;
use crate::render::templates::TemplateStore;

/// Handle to the external LaTeX compiler executable.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    executable: PathBuf,
    timeout: Duration,
}

impl LatexCompiler {
    /// Resolves the compiler executable on PATH. Called per request, before
    /// any working directory is created, so a missing toolchain surfaces as
    /// a precondition failure rather than a half-built workspace.
    pub fn locate(binary: &str, timeout: Duration) -> Result<Self, AppError> {
        let executable =
            find_in_path(binary).ok_or_else(|| AppError::ToolNotFound(binary.to_string()))?;
        Ok(Self {
            executable,
            timeout,
        })
    }

    /// Compiles `source` as `<name>.tex` inside an isolated working
    /// directory and returns the produced PDF bytes.
    pub async fn compile(
        &self,
        store: &TemplateStore,
        name: &str,
        source: &str,
    ) -> Result<Bytes, AppError> {
        let workdir = tempfile::Builder::new()
            .prefix("dossier-latex-")
            .tempdir()
            .map_err(|e| AppError::io("Failed to create temp directory", e))?;

        let tex_path = workdir.path().join(format!("{name}.tex"));
        tokio::fs::write(&tex_path, source)
            .await
            .map_err(|e| AppError::io(format!("Failed to write {name}.tex"), e))?;

        copy_fragments(store, workdir.path()).await?;

        self.run(workdir.path(), &tex_path).await?;

        let pdf_path = workdir.path().join(format!("{name}.pdf"));
        let pdf = tokio::fs::read(&pdf_path)
            .await
            .map_err(|e| AppError::io(format!("Failed to read generated {name}.pdf"), e))?;

        Ok(Bytes::from(pdf))
        // `workdir` drops here and the directory is removed with it.
    }

    async fn run(&self, workdir: &Path, tex_path: &Path) -> Result<(), AppError> {
        let mut command = Command::new(&self.executable);
        command
            .arg("-interaction=nonstopmode")
            .arg("-halt-on-error")
            .arg(format!("-output-directory={}", workdir.display()))
            .arg(tex_path)
            .current_dir(workdir)
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| {
                AppError::Compilation(format!(
                    "{} timed out after {}s",
                    self.executable.display(),
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| {
                AppError::io(format!("Failed to run {}", self.executable.display()), e)
            })?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            error!("LaTeX compilation failed ({}):\n{combined}", output.status);
            return Err(AppError::Compilation(combined));
        }
        Ok(())
    }
}

/// Copies every static `.tex` fragment into the working directory so
/// `\input` references resolve during compilation.
async fn copy_fragments(store: &TemplateStore, workdir: &Path) -> Result<(), AppError> {
    for path in store.fragment_paths()? {
        let Some(file_name) = path.file_name() else {
            continue;
        };
        tokio::fs::copy(&path, workdir.join(file_name))
            .await
            .map_err(|e| AppError::io(format!("Failed to copy fragment {}", path.display()), e))?;
    }
    Ok(())
}

/// Minimal PATH lookup. A binary given as a path (containing a separator)
/// is checked directly instead.
fn find_in_path(binary: &str) -> Option<PathBuf> {
    let candidate = Path::new(binary);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(binary))
        .find(|path| is_executable(path))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, TemplateStore) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("resume_head.tex"), "% head\n").unwrap();
        let store = TemplateStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_locate_missing_binary_is_tool_not_found() {
        let err = LatexCompiler::locate(
            "definitely-not-a-real-latex-binary",
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::ToolNotFound(_)));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;

        /// Writes an executable stub standing in for pdflatex.
        fn write_stub(dir: &Path, script: &str) -> PathBuf {
            use std::os::unix::fs::PermissionsExt;
            let path = dir.join("fake-pdflatex");
            std::fs::write(&path, script).unwrap();
            let mut perms = std::fs::metadata(&path).unwrap().permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&path, perms).unwrap();
            path
        }

        fn compiler_for(stub: &Path, timeout: Duration) -> LatexCompiler {
            LatexCompiler {
                executable: stub.to_path_buf(),
                timeout,
            }
        }

        const SUCCEEDING_STUB: &str = r#"#!/bin/sh
outdir=""
tex=""
for arg in "$@"; do
  case "$arg" in
    -output-directory=*) outdir="${arg#-output-directory=}" ;;
    *.tex) tex="$arg" ;;
  esac
done
base=$(basename "$tex" .tex)
printf '%%PDF-1.4 stub %s' "$base" > "$outdir/$base.pdf"
"#;

        #[tokio::test]
        async fn test_compile_returns_pdf_bytes() {
            let stub_dir = TempDir::new().unwrap();
            let stub = write_stub(stub_dir.path(), SUCCEEDING_STUB);
            let (_frag_dir, store) = test_store();

            let compiler = compiler_for(&stub, Duration::from_secs(5));
            let pdf = compiler
                .compile(&store, "resume", "\\documentclass{article}")
                .await
                .unwrap();
            assert_eq!(&pdf[..], b"%PDF-1.4 stub resume");
        }

        #[tokio::test]
        async fn test_failed_compile_carries_compiler_output() {
            let stub_dir = TempDir::new().unwrap();
            let stub = write_stub(
                stub_dir.path(),
                "#!/bin/sh\necho '! Undefined control sequence.'\nexit 1\n",
            );
            let (_frag_dir, store) = test_store();

            let compiler = compiler_for(&stub, Duration::from_secs(5));
            let err = compiler.compile(&store, "resume", "\\badmacro{").await.unwrap_err();
            match err {
                AppError::Compilation(output) => {
                    assert!(output.contains("Undefined control sequence"));
                }
                other => panic!("expected Compilation error, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_failed_compile_removes_working_directory() {
            let stub_dir = TempDir::new().unwrap();
            // The stub records the working directory it was handed, then fails.
            let marker = stub_dir.path().join("observed-workdir");
            let script = format!(
                "#!/bin/sh\nfor arg in \"$@\"; do\n  case \"$arg\" in\n    -output-directory=*) printf '%%s' \"${{arg#-output-directory=}}\" > {} ;;\n  esac\ndone\nexit 1\n",
                marker.display()
            );
            let stub = write_stub(stub_dir.path(), &script);
            let (_frag_dir, store) = test_store();

            let compiler = compiler_for(&stub, Duration::from_secs(5));
            let err = compiler.compile(&store, "resume", "broken").await.unwrap_err();
            assert!(matches!(err, AppError::Compilation(_)));

            let observed = std::fs::read_to_string(&marker).unwrap();
            assert!(!observed.is_empty());
            assert!(
                !Path::new(observed.trim()).exists(),
                "working directory should be removed after failure"
            );
        }

        #[tokio::test]
        async fn test_hung_compiler_times_out_and_cleans_up() {
            let stub_dir = TempDir::new().unwrap();
            let stub = write_stub(stub_dir.path(), "#!/bin/sh\nsleep 30\n");
            let (_frag_dir, store) = test_store();

            let compiler = compiler_for(&stub, Duration::from_millis(200));
            let err = compiler.compile(&store, "resume", "slow").await.unwrap_err();
            match err {
                AppError::Compilation(msg) => assert!(msg.contains("timed out")),
                other => panic!("expected Compilation error, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_fragments_are_copied_into_workdir() {
            let stub_dir = TempDir::new().unwrap();
            // The stub fails if the fragment is absent from its working directory.
            let script = r#"#!/bin/sh
outdir=""
tex=""
for arg in "$@"; do
  case "$arg" in
    -output-directory=*) outdir="${arg#-output-directory=}" ;;
    *.tex) tex="$arg" ;;
  esac
done
[ -f "$outdir/resume_head.tex" ] || { echo 'missing fragment'; exit 1; }
base=$(basename "$tex" .tex)
printf 'ok' > "$outdir/$base.pdf"
"#;
            let stub = write_stub(stub_dir.path(), script);
            let (_frag_dir, store) = test_store();

            let compiler = compiler_for(&stub, Duration::from_secs(5));
            let pdf = compiler.compile(&store, "resume", "doc").await.unwrap();
            assert_eq!(&pdf[..], b"ok");
        }
    }
}
