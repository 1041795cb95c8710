//! Integration tests for the explorer shell
//!
//! Each test starts a `Shell` inside a fresh temporary directory and drives it
//! one command line at a time, checking the captured output and the state of
//! the filesystem afterwards.

use fexp::{ExecContext, Flow, PermissionSet, Shell};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Session {
    _temp: TempDir,
    shell: Shell,
    ctx: ExecContext,
}

impl Session {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let shell = Shell::new(temp.path()).unwrap();
        Self {
            _temp: temp,
            shell,
            ctx: ExecContext::captured(),
        }
    }

    fn root(&self) -> &Path {
        self.shell.cwd()
    }

    /// Run one line and return what it printed on stdout.
    fn run(&mut self, line: &str) -> String {
        let flow = self.shell.execute(line, &mut self.ctx).unwrap();
        assert_eq!(flow, Flow::Continue);
        self.ctx.stdout.take()
    }

    fn stderr(&mut self) -> String {
        self.ctx.stderr.take()
    }
}

fn ls_row<'a>(listing: &'a str, name: &str) -> Option<Vec<&'a str>> {
    listing
        .lines()
        .skip(1)
        .map(|line| line.split_whitespace().collect::<Vec<_>>())
        .find(|cols| cols.last() == Some(&name))
}

#[test]
fn touched_file_is_listed_as_empty_file() {
    let mut s = Session::new();
    let path = s.root().join("f");

    assert_eq!(s.run("touch f"), format!("Touched {path:?}\n"));

    let listing = s.run("ls");
    assert!(listing.starts_with("Permissions Size      Type        Name\n"));
    let row = ls_row(&listing, "f").expect("f listed");
    assert_eq!(row[1], "0");
    assert_eq!(row[2], "file");
}

#[test]
fn ls_shows_directory_kind_and_permissions() {
    let mut s = Session::new();
    fs::create_dir(s.root().join("sub")).unwrap();
    fs::write(s.root().join("data.bin"), b"12345").unwrap();
    fs::set_permissions(
        s.root().join("data.bin"),
        std::os::unix::fs::PermissionsExt::from_mode(0o640),
    )
    .unwrap();

    let listing = s.run("ls .");
    let row = ls_row(&listing, "sub").expect("sub listed");
    assert_eq!(row[1], "0");
    assert_eq!(row[2], "dir");

    let row = ls_row(&listing, "data.bin").expect("data.bin listed");
    assert_eq!(row, vec!["rw-r-----", "5", "file", "data.bin"]);
}

#[test]
fn ls_on_missing_or_file_reports_and_continues() {
    let mut s = Session::new();
    let missing = s.root().join("nowhere");
    assert_eq!(s.run("ls nowhere"), format!("Path doesn't exist: {missing:?}\n"));

    s.run("touch plain");
    let plain = s.root().join("plain");
    assert_eq!(s.run("ls plain"), format!("{plain:?} is not a directory\n"));
}

#[test]
fn cp_then_cat_yields_same_content_and_overwrites() {
    let mut s = Session::new();
    fs::write(s.root().join("a"), "line one\nline two\n").unwrap();

    let a = s.root().join("a");
    let b = s.root().join("b");
    assert_eq!(s.run("cp a b"), format!("Copied {a:?} -> {b:?}\n"));
    let original = s.run("cat a");
    assert_eq!(s.run("cat b"), original);
    assert_eq!(original, "line one\nline two\n");

    fs::write(s.root().join("a"), "changed\n").unwrap();
    s.run("cp a b");
    assert_eq!(s.run("cat b"), "changed\n");
    assert!(s.stderr().is_empty());
}

#[test]
fn cp_of_missing_source_reports_on_stderr() {
    let mut s = Session::new();

    assert_eq!(s.run("cp ghost copy"), "");
    assert!(s.stderr().starts_with("Copy failed: "));
    assert!(!s.root().join("copy").exists());
}

#[test]
fn cat_adds_newline_to_unterminated_last_line() {
    let mut s = Session::new();
    fs::write(s.root().join("note"), "no newline").unwrap();

    assert_eq!(s.run("cat note"), "no newline\n");
}

#[test]
fn cat_refuses_directories() {
    let mut s = Session::new();
    fs::create_dir(s.root().join("d")).unwrap();
    let d = s.root().join("d");

    assert_eq!(
        s.run("cat d"),
        format!("File does not exist or not a regular file: {d:?}\n")
    );
}

#[test]
fn mv_moves_once_then_fails_without_side_effects() {
    let mut s = Session::new();
    fs::write(s.root().join("a"), "payload").unwrap();

    assert_eq!(s.run("mv a b"), "Moved\n");
    assert!(!s.root().join("a").exists());
    assert_eq!(fs::read_to_string(s.root().join("b")).unwrap(), "payload");

    assert_eq!(s.run("mv a b"), "Move failed\n");
    assert!(s.stderr().starts_with("Copy failed: "));
    assert!(!s.root().join("a").exists());
    assert_eq!(fs::read_to_string(s.root().join("b")).unwrap(), "payload");
}

#[test]
fn mv_renames_directories() {
    let mut s = Session::new();
    fs::create_dir_all(s.root().join("old/inner")).unwrap();

    assert_eq!(s.run("mv old new"), "Moved\n");
    assert!(s.root().join("new/inner").is_dir());
}

#[test]
fn search_finds_names_containing_pattern() {
    let mut s = Session::new();
    fs::write(s.root().join("foo.txt"), "").unwrap();
    fs::create_dir(s.root().join("bar")).unwrap();
    fs::write(s.root().join("bar/foo2"), "").unwrap();
    fs::write(s.root().join("barfoo"), "").unwrap();
    fs::write(s.root().join("other"), "").unwrap();

    let out = s.run("search foo .");
    let mut names: Vec<String> = out
        .lines()
        .map(|line| {
            Path::new(line)
                .strip_prefix(s.root().join("."))
                .unwrap()
                .display()
                .to_string()
        })
        .collect();
    names.sort();
    assert_eq!(names, vec!["bar/foo2", "barfoo", "foo.txt"]);
}

#[test]
fn search_defaults_to_cwd_and_checks_start() {
    let mut s = Session::new();
    fs::write(s.root().join("needle"), "").unwrap();

    assert_eq!(
        s.run("search needle"),
        format!("{}\n", s.root().join("needle").display())
    );

    let missing = s.root().join("missing");
    assert_eq!(
        s.run("search x missing"),
        format!("Start path doesn't exist: {missing:?}\n")
    );
}

#[test]
fn rm_removes_trees_and_reports_missing_paths() {
    let mut s = Session::new();
    fs::create_dir_all(s.root().join("tree/a/b")).unwrap();
    fs::write(s.root().join("tree/a/b/leaf"), "x").unwrap();
    fs::write(s.root().join("keep"), "x").unwrap();
    let tree = s.root().join("tree");

    assert_eq!(
        s.run("rm tree"),
        format!("Removing directory recursively: {tree:?}\nRemoved\n")
    );
    assert!(!tree.exists());

    let ghost = s.root().join("ghost");
    assert_eq!(s.run("rm ghost"), format!("Path doesn't exist: {ghost:?}\n"));
    assert!(s.root().join("keep").exists());

    assert_eq!(s.run("rm keep"), "Removed\n");
    assert!(!s.root().join("keep").exists());
}

#[test]
fn cd_moves_between_directories() {
    let mut s = Session::new();
    let root = s.root().to_path_buf();
    fs::create_dir(root.join("child")).unwrap();

    assert_eq!(s.run("cd child"), "");
    assert_eq!(s.shell.cwd(), root.join("child"));
    assert_eq!(s.run("pwd"), format!("{}\n", root.join("child").display()));

    s.run("cd ..");
    assert_eq!(s.shell.cwd(), root);

    s.run("cd ./child/../child");
    assert_eq!(s.shell.cwd(), root.join("child"));
}

#[test]
fn cd_rejects_bad_targets_and_keeps_cwd() {
    let mut s = Session::new();
    let root = s.root().to_path_buf();
    fs::write(root.join("file"), "").unwrap();

    assert_eq!(
        s.run("cd file"),
        format!("Cannot change directory to: {:?}\n", root.join("file"))
    );
    assert_eq!(
        s.run("cd -"),
        "Use absolute or relative path. '-' not supported here.\n"
    );
    assert_eq!(s.shell.cwd(), root);
}

#[test]
fn cd_parent_of_root_is_root() {
    let mut shell = Shell::new("/").unwrap();
    let mut ctx = ExecContext::captured();

    shell.execute("cd ..", &mut ctx).unwrap();
    assert_eq!(shell.cwd(), Path::new("/"));
    assert!(ctx.stdout.text().is_empty());
}

#[test]
fn quoted_arguments_keep_spaces() {
    let mut s = Session::new();

    s.run(r#"mkdir "my dir""#);
    assert!(s.root().join("my dir").is_dir());
    s.run(r#"touch "my dir/a file.txt""#);
    assert!(s.root().join("my dir/a file.txt").is_file());
}

#[test]
fn mkdir_creates_parents_and_reports_existing() {
    let mut s = Session::new();
    let nested = s.root().join("x/y/z");

    assert_eq!(s.run("mkdir x/y/z"), format!("Created {nested:?}\n"));
    assert!(nested.is_dir());
    assert_eq!(s.run("mkdir x/y/z"), format!("Already exists: {nested:?}\n"));
}

#[test]
fn chmod_sets_bits_and_validates_mode() {
    use std::os::unix::fs::PermissionsExt;

    let mut s = Session::new();
    s.run("touch script");
    let script = s.root().join("script");

    assert_eq!(s.run("chmod 0750 script"), "Permissions updated\n");
    let mode = fs::metadata(&script).unwrap().permissions().mode();
    assert_eq!(PermissionSet::from_mode(mode).octal(), "750");

    assert_eq!(
        s.run("chmod 9z9 script"),
        "Invalid mode. Provide octal like 755 or 0755\n"
    );
    let missing = s.root().join("missing");
    assert_eq!(
        s.run("chmod 644 missing"),
        format!("Path doesn't exist: {missing:?}\n")
    );
}

#[test]
fn help_lists_commands_and_explains_one() {
    let mut s = Session::new();

    let all = s.run("help");
    assert!(all.starts_with("Commands:\n"));
    for name in ["ls", "pwd", "cd", "cat", "cp", "mv", "rm", "touch", "mkdir", "search", "chmod", "exit"] {
        assert!(all.contains(&format!("  {name} ")), "missing {name}");
    }

    assert!(s.run("help search").contains("Usage: search <pattern> [start-path]"));
    assert_eq!(s.run("help bogus"), "No help for: bogus\n");
}

#[test]
fn cp_onto_hard_link_keeps_data() {
    let mut s = Session::new();
    fs::write(s.root().join("a"), "precious").unwrap();
    fs::hard_link(s.root().join("a"), s.root().join("b")).unwrap();

    assert_eq!(s.run("cp a b"), "");
    assert_eq!(
        s.stderr(),
        "Copy failed: source and destination are the same file\n"
    );
    assert_eq!(fs::read_to_string(s.root().join("a")).unwrap(), "precious");
}

#[test]
fn chmod_drops_special_bits() {
    use std::os::unix::fs::PermissionsExt;

    let mut s = Session::new();
    s.run("touch f");

    assert_eq!(s.run("chmod 4755 f"), "Permissions updated\n");
    let mode = fs::metadata(s.root().join("f")).unwrap().permissions().mode();
    assert_eq!(mode & 0o7777, 0o755);
}

#[test]
fn search_from_a_file_reports_stop() {
    let mut s = Session::new();
    fs::write(s.root().join("foo"), "").unwrap();

    let out = s.run("search foo foo");
    assert!(out.starts_with("Search stopped: "), "got {out:?}");
    assert!(out.contains("Not a directory"));
}

/// A scratch directory on a different filesystem than the session, if one exists.
fn other_device(session_root: &Path) -> Option<TempDir> {
    use std::os::unix::fs::MetadataExt;

    let shm = Path::new("/dev/shm");
    if !shm.is_dir() {
        return None;
    }
    let dir = TempDir::new_in(shm).ok()?;
    let here = fs::metadata(session_root).ok()?.dev();
    let there = fs::metadata(dir.path()).ok()?.dev();
    (here != there).then_some(dir)
}

#[test]
fn mv_across_devices_copies_then_deletes() {
    let mut s = Session::new();
    let Some(remote) = other_device(s.root()) else {
        return;
    };
    fs::write(s.root().join("a"), "payload").unwrap();
    let dst = remote.path().join("moved");

    assert_eq!(s.run(&format!("mv a {}", dst.display())), "Moved\n");
    assert!(!s.root().join("a").exists());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "payload");
}

#[test]
fn mv_symlink_across_devices_fails_and_keeps_link() {
    let mut s = Session::new();
    let Some(remote) = other_device(s.root()) else {
        return;
    };
    fs::write(s.root().join("target"), "data").unwrap();
    std::os::unix::fs::symlink(s.root().join("target"), s.root().join("link")).unwrap();
    let dst = remote.path().join("moved");

    let out = s.run(&format!("mv link {}", dst.display()));
    assert!(out.starts_with("Rename failed: "), "got {out:?}");
    assert!(out.ends_with("Move failed\n"));
    assert!(fs::symlink_metadata(s.root().join("link"))
        .unwrap()
        .file_type()
        .is_symlink());
    assert!(fs::symlink_metadata(&dst).is_err());
}

#[test]
fn mv_warns_when_source_cannot_be_removed() {
    use std::os::unix::fs::PermissionsExt;

    let mut s = Session::new();
    let locked = s.root().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("a"), "payload").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    // Privileged users ignore directory permissions; nothing to observe then.
    let privileged = fs::write(locked.join("canary"), "").is_ok();
    if !privileged {
        let out = s.run("mv locked/a b");
        assert!(
            out.starts_with("Warning: removed source failed: "),
            "got {out:?}"
        );
        assert!(out.ends_with("Moved\n"));
        assert!(locked.join("a").exists());
        assert_eq!(fs::read_to_string(s.root().join("b")).unwrap(), "payload");
    }

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}
