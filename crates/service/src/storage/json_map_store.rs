use std::{fmt, io, marker::PhantomData, path::{Path, PathBuf}};

use serde::{
    de::{DeserializeOwned, MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map store.
///
/// Persists entries as one JSON object and keeps them in document order, so
/// a listing returns records in the order they were first written. Every
/// mutation rewrites the file while the write lock is held.
pub struct JsonMapStore<K, V> {
    inner: RwLock<Vec<(K, V)>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Serialize + DeserializeOwned + Clone + Send + Sync,
    V: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Initialize the store from a path. Creates the file with an empty map if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let entries: Vec<(K, V)> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => {
                let OrderedEntries(entries) = serde_json::from_slice(&bytes).map_err(|e| {
                    ServiceError::Db(format!("{}: {}", file_path.display(), e))
                })?;
                entries
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let empty: Vec<(K, V)> = Vec::new();
                write_entries(&file_path, &empty).await?;
                empty
            }
            // 文件存在但无法读取时不能覆盖
            Err(e) => return Err(ServiceError::Db(format!("{}: {}", file_path.display(), e))),
        };

        Ok(Self { inner: RwLock::new(entries), file_path })
    }

    /// List all entries as `(key, value)` pairs in document order.
    pub async fn list(&self) -> Vec<(K, V)> {
        self.inner.read().await.clone()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.inner.read().await;
        entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    /// Apply a mutation to the entries and persist it. Nothing is written when `f` fails.
    pub async fn update_map<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut Vec<(K, V)>) -> Result<T, ServiceError> + Send,
        T: Send,
    {
        let mut entries = self.inner.write().await;
        let mut next = entries.clone();
        let out = f(&mut next)?;
        write_entries(&self.file_path, &next).await?;
        *entries = next;
        debug!(path = %self.file_path.display(), count = entries.len(), "json_map_store_saved");
        Ok(out)
    }
}

async fn write_entries<K: Serialize, V: Serialize>(path: &Path, entries: &[(K, V)]) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(&EntriesRef(entries)).map_err(ServiceError::db)?;
    fs::write(path, data).await.map_err(ServiceError::db)?;
    Ok(())
}

/// Serializes a slice of pairs as a JSON object without reordering.
struct EntriesRef<'a, K, V>(&'a [(K, V)]);

impl<K: Serialize, V: Serialize> Serialize for EntriesRef<'_, K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Reads a JSON object into pairs in document order. A repeated key keeps its
/// first position and its last value.
struct OrderedEntries<K, V>(Vec<(K, V)>);

impl<'de, K, V> Deserialize<'de> for OrderedEntries<K, V>
where
    K: Deserialize<'de> + Eq,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<K, V>(PhantomData<(K, V)>);

        impl<'de, K, V> Visitor<'de> for EntriesVisitor<K, V>
        where
            K: Deserialize<'de> + Eq,
            V: Deserialize<'de>,
        {
            type Value = OrderedEntries<K, V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object keyed by record id")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(K, V)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<K, V>()? {
                    match entries.iter_mut().find(|(existing, _)| *existing == k) {
                        Some(slot) => slot.1 = v,
                        None => entries.push((k, v)),
                    }
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}
