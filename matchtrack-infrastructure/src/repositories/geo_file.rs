use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tracing::{info, warn};

use matchtrack_domain::{City, GeoDirectory};

/// City directory loaded once from a YAML or JSON file.
pub struct FileGeoDirectory {
    cities: HashMap<i64, City>,
}

impl FileGeoDirectory {
    pub fn from_cities(cities: Vec<City>) -> Self {
        Self {
            cities: cities.into_iter().map(|city| (city.id, city)).collect(),
        }
    }

    pub async fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            warn!("cities file {} not found, city lookups will fail", path);
            return Ok(Self::from_cities(Vec::new()));
        }
        let content = fs::read_to_string(path).await?;
        let cities = parse_cities(path, &content)?;
        info!("loaded {} cities from {}", cities.len(), path);
        Ok(Self::from_cities(cities))
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

fn parse_cities(path: &str, content: &str) -> Result<Vec<City>> {
    if path.ends_with(".json") {
        Ok(serde_json::from_str(content)?)
    } else {
        Ok(serde_yaml::from_str(content)?)
    }
}

#[async_trait]
impl GeoDirectory for FileGeoDirectory {
    async fn city_by_id(&self, city_id: i64) -> anyhow::Result<Option<City>> {
        Ok(self.cities.get(&city_id).cloned())
    }
}
