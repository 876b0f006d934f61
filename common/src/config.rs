use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use hocon::{Hocon, HoconLoader};
use log::debug;

/// Loads settings from a HOCON file, looking first in the environment, then in the named scope of the
/// file and finally in its top level.
///
/// Environment variables are matched against the upper cased key, so `solve_depth` can be overridden
/// with `SOLVE_DEPTH`.
#[derive(Debug)]
pub struct ConfigLoader {
    hocon: Hocon,
    env: HashMap<String, String>,
    scope: String,
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(path: impl AsRef<Path>, scope: String) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(anyhow!("The config file {:?} was not found", path));
        }

        let hocon = HoconLoader::new()
            .load_file(path)
            .with_context(|| format!("Failed to find or load config file at: {:?}", path))?
            .hocon()?;

        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self::with_hocon(hocon, scope, base_dir))
    }

    /// Builds a loader from an in-memory document. Relative paths resolve against the working directory.
    pub fn load_str(s: &str, scope: String) -> Result<Self> {
        let hocon = HoconLoader::new()
            .load_str(s)
            .context("Failed to parse config")?
            .hocon()?;

        let base_dir = std::env::current_dir()?;

        Ok(Self::with_hocon(hocon, scope, base_dir))
    }

    fn with_hocon(hocon: Hocon, scope: String, base_dir: PathBuf) -> Self {
        let env = std::env::vars().collect::<HashMap<_, _>>();

        Self {
            hocon,
            env,
            scope,
            base_dir,
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.env.get(&name.to_uppercase()) {
            debug!("Config {} taken from the environment", name);
            return Some(Value::String(value.clone()));
        }

        let scope = &self.hocon[self.scope.as_str()];
        if matches!(scope, Hocon::Hash(_)) {
            if let Some(value) = Self::map_hocon(scope, name) {
                return Some(value);
            }
        }

        Self::map_hocon(&self.hocon, name)
    }

    /// Resolves a path valued setting relative to the directory of the config file.
    pub fn get_relative_path(&self, name: &str) -> Result<PathBuf> {
        let path = self
            .get(name)
            .and_then(|v| v.as_string())
            .ok_or_else(|| anyhow!("Config value {} is missing", name))?;

        Ok(self.base_dir.join(path))
    }

    pub fn load<T: Config>(&self) -> Result<T> {
        T::load(self)
    }

    fn map_hocon(hocon: &Hocon, name: &str) -> Option<Value> {
        match &hocon[name] {
            Hocon::Real(f64) => Some(Value::Float(*f64 as f32)),
            Hocon::Integer(i64) => Some(Value::Integer(*i64)),
            Hocon::String(string) => Some(Value::String(string.clone())),
            Hocon::Boolean(bool) => Some(Value::Boolean(*bool)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f32),
    Boolean(bool),
}

impl Value {
    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Value::Integer(val) => usize::try_from(*val).ok(),
            Value::String(val) => val.parse::<usize>().ok(),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Integer(val) => i32::try_from(*val).ok(),
            Value::String(val) => val.parse::<i32>().ok(),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::String(val) => Some(val.clone()),
            Value::Boolean(true) => Some("true".to_string()),
            Value::Boolean(false) => Some("false".to_string()),
            Value::Float(val) => Some(val.to_string()),
            Value::Integer(val) => Some(val.to_string()),
        }
    }
}

pub trait Config {
    fn load(config: &ConfigLoader) -> Result<Self>
    where
        Self: Sized;
}
