//! 集合调和
//!
//! 把已存储的集合变换为期望集合所需的最小写操作：
//! 删除 = 旧 − 新，插入 = 新 − 旧，更新 = 交集中值发生变化的部分。

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// 调和计划
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan<K, V> {
    pub to_delete: Vec<K>,
    pub to_insert: Vec<V>,
    pub to_update: Vec<(K, V)>,
}

impl<K, V> ReconcilePlan<K, V> {
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_insert.is_empty() && self.to_update.is_empty()
    }
}

impl<K, V> Default for ReconcilePlan<K, V> {
    fn default() -> Self {
        Self {
            to_delete: Vec::new(),
            to_insert: Vec::new(),
            to_update: Vec::new(),
        }
    }
}

/// 按 key 调和
///
/// `desired` 中 key 为 `None` 的条目总是插入；key 不在 `current` 中的条目也作为插入处理。
/// 同一个 key 重复出现时以第一次为准。输出顺序跟随输入顺序。
pub fn reconcile<K, V>(
    current: impl IntoIterator<Item = (K, V)>,
    desired: impl IntoIterator<Item = (Option<K>, V)>,
) -> ReconcilePlan<K, V>
where
    K: Eq + Hash + Copy,
    V: PartialEq,
{
    let current: Vec<(K, V)> = current.into_iter().collect();
    let index: HashMap<K, &V> = current.iter().map(|(k, v)| (*k, v)).collect();

    let mut plan = ReconcilePlan::default();
    let mut kept: HashSet<K> = HashSet::new();

    for (key, value) in desired {
        let Some(key) = key else {
            plan.to_insert.push(value);
            continue;
        };
        if !kept.insert(key) {
            continue;
        }
        match index.get(&key) {
            Some(old) if **old == value => {}
            Some(_) => plan.to_update.push((key, value)),
            None => plan.to_insert.push(value),
        }
    }

    plan.to_delete = current
        .iter()
        .map(|(k, _)| *k)
        .filter(|k| !kept.contains(k))
        .collect();
    plan
}

/// 按值集合调和（没有独立身份的关联，例如商品与分类的链接）
pub fn reconcile_keys<K>(
    current: impl IntoIterator<Item = K>,
    desired: impl IntoIterator<Item = K>,
) -> ReconcilePlan<K, K>
where
    K: Eq + Hash + Copy,
{
    reconcile(
        current.into_iter().map(|k| (k, k)),
        desired.into_iter().map(|k| (Some(k), k)),
    )
}
