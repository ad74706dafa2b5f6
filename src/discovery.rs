use std::env;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_MODEL_DIR, DEPPARSE_MODEL_FILE, LEMMA_MODEL_FILE, POS_MODEL_FILE};

pub(crate) fn default_library_candidates() -> &'static [&'static str] {
    #[cfg(target_os = "windows")]
    {
        &["stanza.dll", "libstanza.dll"]
    }
    #[cfg(target_os = "macos")]
    {
        &[
            "libstanza.dylib",
            "stanza.dylib",
            "/usr/local/lib/libstanza.dylib",
            "/opt/homebrew/lib/libstanza.dylib",
            "@rpath/libstanza.dylib",
            "@loader_path/libstanza.dylib",
        ]
    }
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        &[
            "libstanza.so",
            "stanza.so",
            "./libstanza.so",
            "/usr/local/lib/libstanza.so",
            "/usr/lib/libstanza.so",
        ]
    }
}

pub(crate) fn discover_default_library_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Some(local_app_data) = env::var_os("LOCALAPPDATA") {
            let path = PathBuf::from(local_app_data)
                .join("stanza")
                .join("lib")
                .join("stanza.dll");
            if path.exists() {
                return Some(path);
            }
        }
        let well_known = [
            PathBuf::from("C:\\stanza\\lib\\stanza.dll"),
            PathBuf::from("C:\\Program Files\\Stanza\\lib\\stanza.dll"),
        ];
        for path in well_known {
            if path.exists() {
                return Some(path);
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = env::var_os("HOME") {
            let path = PathBuf::from(home)
                .join(".local")
                .join("stanza")
                .join("lib")
                .join("libstanza.dylib");
            if path.exists() {
                return Some(path);
            }
        }

        let well_known = [
            PathBuf::from("/usr/local/lib/libstanza.dylib"),
            PathBuf::from("/opt/homebrew/lib/libstanza.dylib"),
        ];
        for path in well_known {
            if path.exists() {
                return Some(path);
            }
        }
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        if let Some(home) = env::var_os("HOME") {
            let path = PathBuf::from(home)
                .join(".local")
                .join("stanza")
                .join("lib")
                .join("libstanza.so");
            if path.exists() {
                return Some(path);
            }
        }

        let well_known = [
            PathBuf::from("/usr/local/lib/libstanza.so"),
            PathBuf::from("/usr/lib/libstanza.so"),
        ];
        for path in well_known {
            if path.exists() {
                return Some(path);
            }
        }
    }

    None
}

/// Returns whether `dir` contains the full pretrained model triple.
pub(crate) fn model_triple_exists(dir: &Path) -> bool {
    dir.join(POS_MODEL_FILE).exists()
        && dir.join(LEMMA_MODEL_FILE).exists()
        && dir.join(DEPPARSE_MODEL_FILE).exists()
}

pub(crate) fn discover_default_model_dir() -> Option<PathBuf> {
    if let Some(path) = env::var_os("STANZA_MODEL_PATH") {
        return Some(PathBuf::from(path));
    }

    let relative = PathBuf::from(DEFAULT_MODEL_DIR);
    if model_triple_exists(&relative) {
        return Some(relative);
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(local_app_data) = env::var_os("LOCALAPPDATA") {
            let path = PathBuf::from(local_app_data)
                .join("stanza")
                .join("models")
                .join("ko")
                .join("gsd");
            if model_triple_exists(&path) {
                return Some(path);
            }
        }
    }

    #[cfg(target_os = "windows")]
    let candidates: &[&str] = &[
        "C:\\stanza\\models\\ko\\gsd",
        "C:\\Program Files\\Stanza\\models\\ko\\gsd",
    ];

    #[cfg(not(target_os = "windows"))]
    let candidates: &[&str] = &[
        "~/stanza_resources/ko/gsd",
        "~/.local/stanza/models/ko/gsd",
        "/usr/local/share/stanza/ko/gsd",
        "/usr/share/stanza/ko/gsd",
    ];

    for candidate in candidates {
        let path = if let Some(stripped) = candidate.strip_prefix("~/") {
            match env::var_os("HOME") {
                Some(home) => PathBuf::from(home).join(stripped),
                None => continue,
            }
        } else {
            PathBuf::from(candidate)
        };
        if model_triple_exists(&path) {
            return Some(path);
        }
    }

    None
}

#[cfg(test)]
mod discovery_tests {
    use super::{
        default_library_candidates, discover_default_library_path, discover_default_model_dir,
        model_triple_exists,
    };
    use crate::constants::{DEPPARSE_MODEL_FILE, LEMMA_MODEL_FILE, POS_MODEL_FILE};
    use crate::test_support::with_env_vars;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn make_temp_dir(name: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be monotonic")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("kotok-{name}-{suffix}"));
        fs::create_dir_all(&path).expect("failed to create temp dir");
        path
    }

    fn remove_tree(path: &Path) {
        let _ = fs::remove_dir_all(path);
    }

    fn write_model_triple(dir: &Path) {
        for file in [POS_MODEL_FILE, LEMMA_MODEL_FILE, DEPPARSE_MODEL_FILE] {
            let path = dir.join(file);
            fs::create_dir_all(path.parent().expect("model file has a parent dir"))
                .expect("failed to create model subdir");
            fs::write(&path, b"").expect("failed to create fake model file");
        }
    }

    #[test]
    fn default_library_candidates_match_platform() {
        let candidates = default_library_candidates();
        assert!(!candidates.is_empty());

        #[cfg(target_os = "windows")]
        assert!(candidates
            .iter()
            .all(|candidate| candidate.ends_with(".dll")));
        #[cfg(target_os = "macos")]
        assert!(candidates
            .iter()
            .any(|candidate| candidate.ends_with(".dylib")));
        #[cfg(all(unix, not(target_os = "macos")))]
        assert!(candidates
            .iter()
            .any(|candidate| candidate.ends_with(".so")));
    }

    #[test]
    fn discover_default_model_dir_prefers_env_var() {
        with_env_vars(
            &[
                ("STANZA_MODEL_PATH", Some("/tmp/kotok-model-from-env")),
                ("HOME", None),
                ("LOCALAPPDATA", None),
            ],
            || {
                let path = discover_default_model_dir();
                assert_eq!(path, Some(PathBuf::from("/tmp/kotok-model-from-env")));
            },
        );
    }

    #[test]
    fn model_triple_requires_all_three_files() {
        let dir = make_temp_dir("model-triple");
        assert!(!model_triple_exists(&dir));

        write_model_triple(&dir);
        assert!(model_triple_exists(&dir));

        fs::remove_file(dir.join(LEMMA_MODEL_FILE)).expect("failed to remove model file");
        assert!(!model_triple_exists(&dir));

        remove_tree(&dir);
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn discover_default_model_dir_expands_home_candidate() {
        let home = make_temp_dir("discover-model-home");
        let model = home.join("stanza_resources").join("ko").join("gsd");
        write_model_triple(&model);

        with_env_vars(
            &[
                ("STANZA_MODEL_PATH", None),
                ("HOME", Some(home.to_str().expect("utf-8 temp path"))),
            ],
            || {
                let path = discover_default_model_dir();
                assert_eq!(path, Some(model.clone()));
            },
        );

        remove_tree(&home);
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn discover_default_library_path_finds_home_local_library() {
        let home = make_temp_dir("discover-lib-home");
        let library = {
            #[cfg(target_os = "macos")]
            let file_name = "libstanza.dylib";
            #[cfg(all(unix, not(target_os = "macos")))]
            let file_name = "libstanza.so";

            home.join(".local")
                .join("stanza")
                .join("lib")
                .join(file_name)
        };

        fs::create_dir_all(
            library
                .parent()
                .expect("library path must always include a parent"),
        )
        .expect("failed to create library parent dir");
        fs::write(&library, b"").expect("failed to create fake library");

        with_env_vars(
            &[("HOME", Some(home.to_str().expect("utf-8 temp path")))],
            || {
                let path = discover_default_library_path();
                assert_eq!(path, Some(library.clone()));
            },
        );

        remove_tree(&home);
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn discover_default_library_path_returns_none_when_candidates_absent() {
        let home = make_temp_dir("discover-lib-none");
        with_env_vars(
            &[("HOME", Some(home.to_str().expect("utf-8 temp path")))],
            || {
                let path = discover_default_library_path();
                assert!(path.is_none());
            },
        );
        remove_tree(&home);
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn discover_default_model_dir_returns_none_without_env_or_candidates() {
        let home = make_temp_dir("discover-model-none");
        with_env_vars(
            &[
                ("STANZA_MODEL_PATH", None),
                ("HOME", Some(home.to_str().expect("utf-8 temp path"))),
            ],
            || {
                let path = discover_default_model_dir();
                assert!(path.is_none());
            },
        );
        remove_tree(&home);
    }
}
