use std::path::{Path, PathBuf};

/// Process state read while resolving credentials.
pub trait Environment: Send + Sync {
    /// Value of an environment variable. Unset and empty are the same.
    fn var(&self, key: &str) -> Option<String>;
    fn home_dir(&self) -> Option<PathBuf>;
    fn exists(&self, path: &Path) -> bool;
}

/// The real process environment and filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|value| !value.is_empty())
    }

    fn home_dir(&self) -> Option<PathBuf> {
        lib_core::home_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        lib_core::exists(path)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{
        collections::{HashMap, HashSet},
        path::{Path, PathBuf},
    };

    use super::Environment;

    /// Fixed environment for tests; nothing touches the real process.
    #[derive(Debug, Default, Clone)]
    pub(crate) struct FakeEnvironment {
        vars: HashMap<String, String>,
        home: Option<PathBuf>,
        files: HashSet<PathBuf>,
    }

    impl FakeEnvironment {
        pub(crate) fn new() -> Self {
            FakeEnvironment {
                home: Some(PathBuf::from("/home/tester")),
                ..Default::default()
            }
        }

        pub(crate) fn with_var(mut self, key: &str, value: &str) -> Self {
            self.vars.insert(key.to_string(), value.to_string());
            self
        }

        pub(crate) fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
            self.files.insert(path.into());
            self
        }

        pub(crate) fn without_home(mut self) -> Self {
            self.home = None;
            self
        }
    }

    impl Environment for FakeEnvironment {
        fn var(&self, key: &str) -> Option<String> {
            self.vars.get(key).filter(|v| !v.is_empty()).cloned()
        }

        fn home_dir(&self) -> Option<PathBuf> {
            self.home.clone()
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.contains(path)
        }
    }
}
