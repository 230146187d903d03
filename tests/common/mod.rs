#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tempfile::TempDir;

/// Emits one record per file argument, in argument order.
const ECHO_CONVERTER: &str = r#"#!/bin/sh
if [ "$1" != "--format" ] || [ "$2" != "json" ]; then
    echo "unexpected arguments: $*" >&2
    exit 2
fi
shift 2
printf '['
sep=''
for f in "$@"; do
    printf '%s{"Time":"2023-01-01T00:00:00","File":"%s","Temperature":21.5,"AccelerationX":[1.0,2.0,3.0]}' "$sep" "$f"
    sep=','
done
printf ']\n'
"#;

/// Mimics `templogger -t`: tab-indented JSON across several lines.
const PRETTY_CONVERTER: &str = r#"#!/bin/sh
printf '[\n\t{\n\t\t"Time": "2023-01-01T00:00:00",\n\t\t"Value": 1.0\n\t}\n]\n'
"#;

const FAILING_CONVERTER: &str = r#"#!/bin/sh
echo "open $3: no such file or directory" >&2
exit 1
"#;

const NO_TIME_CONVERTER: &str = r#"#!/bin/sh
printf '[{"Value":1.0}]\n'
"#;

pub struct Converters {
    _dir: TempDir,
    pub echo: PathBuf,
    pub pretty: PathBuf,
    pub failing: PathBuf,
    pub no_time: PathBuf,
}

/// Fake converter scripts, written once per test binary.
///
/// Writing them all up front keeps a freshly written script from being
/// executed while another test thread still holds it open (ETXTBSY).
pub fn converters() -> &'static Converters {
    static CONVERTERS: OnceLock<Converters> = OnceLock::new();
    CONVERTERS.get_or_init(|| {
        let dir = tempfile::tempdir().expect("tempdir");
        let echo = write_script(dir.path(), "echo-converter", ECHO_CONVERTER);
        let pretty = write_script(dir.path(), "pretty-converter", PRETTY_CONVERTER);
        let failing = write_script(dir.path(), "failing-converter", FAILING_CONVERTER);
        let no_time = write_script(dir.path(), "no-time-converter", NO_TIME_CONVERTER);
        Converters {
            _dir: dir,
            echo,
            pretty,
            failing,
            no_time,
        }
    })
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, body).expect("write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    path
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}
