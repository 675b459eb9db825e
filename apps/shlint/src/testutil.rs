//! Fake external tools for tests.
//!
//! Each fake is a small `/bin/sh` script written into a scratch `bin`
//! directory. They log their arguments (and stdin where relevant) next to
//! themselves so tests can assert on exact invocations.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Write an executable `#!/bin/sh` script named `name` into `dir`.
pub fn write_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let script = format!("#!/bin/sh\n{}\n", body.replace("@BIN@", &dir.to_string_lossy()));
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// shfmt: `-f=0 DIR` lists `DIR/*.sh` and `DIR/*/*.sh`; `-w FILES` logs to `shfmt.log`.
pub fn fake_shfmt(dir: &Path) -> PathBuf {
    write_tool(
        dir,
        "shfmt",
        r#"case "$1" in
  -f=0)
    for f in "$2"/*.sh "$2"/*/*.sh; do
      [ -e "$f" ] && printf '%s\000' "$f"
    done
    exit 0 ;;
  -w)
    shift
    echo "-w $*" >> "@BIN@/shfmt.log"
    exit 0 ;;
esac
exit 2"#,
    )
}

/// shellcheck: any script containing `BAD` is a finding (exit 1).
///
/// `--format=diff` prints a root-relative diff turning `BAD` into `GOOD`;
/// `--format=checkstyle` prints an empty checkstyle document.
pub fn fake_shellcheck(dir: &Path) -> PathBuf {
    write_tool(
        dir,
        "shellcheck",
        r#"echo "$*" >> "@BIN@/shellcheck.log"
mode=plain
status=0
for a in "$@"; do
  case "$a" in
    --format=diff) mode=diff ;;
    --format=checkstyle) mode=checkstyle ;;
    -*) ;;
    *)
      if [ -f "$a" ] && grep -q BAD "$a"; then
        status=1
        if [ "$mode" = diff ]; then
          printf '%s\n' "--- a/$a" "+++ b/$a" "@@ -1 +1 @@" "-echo BAD" "+echo GOOD"
        fi
      fi ;;
  esac
done
if [ "$mode" = checkstyle ]; then echo '<checkstyle/>'; fi
exit $status"#,
    )
}

/// patch: records args and stdin, then rewrites `BAD` to `GOOD` in each `+++ b/` target.
pub fn fake_patch(dir: &Path) -> PathBuf {
    write_tool(
        dir,
        "patch",
        r#"echo "$*" >> "@BIN@/patch.log"
cat > "@BIN@/patch.input"
for f in $(sed -n 's|^+++ b/||p' "@BIN@/patch.input"); do
  sed 's/BAD/GOOD/' "$f" > "$f.tmp" && mv "$f.tmp" "$f"
done
exit 0"#,
    )
}

/// reviewdog: records args and stdin, exits with `exit`.
pub fn fake_reviewdog(dir: &Path, exit: i32) -> PathBuf {
    write_tool(
        dir,
        "reviewdog",
        &format!(
            r#"echo "$*" >> "@BIN@/reviewdog.log"
cat > "@BIN@/reviewdog.input"
exit {exit}"#
        ),
    )
}

/// git outside a work tree whose `diff` prints a fixed patch.
pub fn fake_git(dir: &Path) -> PathBuf {
    write_tool(
        dir,
        "git",
        r#"case "$1" in
  diff) printf '%s\n' "diff --git a/b.sh b/b.sh" ; exit 0 ;;
esac
exit 128"#,
    )
}

/// `a.sh` (clean), `b.sh` (finding), `.gitignore` excluding `vendor/`, `vendor/c.sh`.
pub fn scenario_tree(root: &Path) {
    fs::create_dir_all(root.join("vendor")).unwrap();
    fs::write(root.join("a.sh"), "echo ok\n").unwrap();
    fs::write(root.join("b.sh"), "echo BAD\n").unwrap();
    fs::write(root.join(".gitignore"), "vendor/\n").unwrap();
    fs::write(root.join("vendor/c.sh"), "echo BAD\n").unwrap();
}

/// Read a fake tool's log, empty when it never ran.
pub fn read_log(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap_or_default()
}
