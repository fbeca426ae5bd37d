use dashmap::DashMap;
use sk_domain::entity::Entity;
use std::hash::Hash;
use std::sync::Arc;

/// 基于内存的实体存储
///
/// 可克隆共享（内部为 `Arc`），仓储与分页提供方可读写同一份数据。
pub struct InMemoryStore<E: Entity> {
    items: Arc<DashMap<E::Id, E>>,
}

impl<E: Entity> Clone for InMemoryStore<E> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<E> Default for InMemoryStore<E>
where
    E: Entity,
    E::Id: Eq + Hash,
{
    fn default() -> Self {
        Self {
            items: Arc::new(DashMap::new()),
        }
    }
}

impl<E> InMemoryStore<E>
where
    E: Entity + Clone,
    E::Id: Eq + Hash + Ord,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入实体，返回被替换的旧值
    pub fn upsert(&self, entity: E) -> Option<E> {
        self.items.insert(entity.id().clone(), entity)
    }

    pub fn get(&self, id: &E::Id) -> Option<E> {
        self.items.get(id).map(|e| e.value().clone())
    }

    pub fn remove(&self, id: &E::Id) -> Option<E> {
        self.items.remove(id).map(|(_, e)| e)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 按标识升序的快照，保证同一数据下的遍历顺序稳定
    pub fn snapshot(&self) -> Vec<E> {
        let mut all: Vec<E> = self.items.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sk_domain::user::AppUser;

    #[test]
    fn snapshot_is_ordered_by_id() {
        let store = InMemoryStore::<AppUser>::new();
        store.upsert(AppUser::registered("c", "carol"));
        store.upsert(AppUser::registered("a", "alice"));
        store.upsert(AppUser::registered("b", "bob"));

        let names: Vec<_> = store
            .snapshot()
            .iter()
            .map(|u| u.username().to_string())
            .collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn clones_share_data() {
        let store = InMemoryStore::<AppUser>::new();
        let other = store.clone();
        store.upsert(AppUser::registered("a", "alice"));
        assert_eq!(other.len(), 1);
        assert!(other.remove(&"a".to_string()).is_some());
        assert!(store.is_empty());
    }
}
