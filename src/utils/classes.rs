use std::{
    collections::{BTreeMap, HashMap},
    hash::Hash,
};

/// Invert a map by swapping keys and values
pub fn invert_map<K, V, MK, MV>(original: MK) -> MV
where
    K: Ord + Hash + Eq,
    V: Ord + Hash + Eq + Clone,
    MK: IntoIterator<Item = (K, V)>,
    MV: FromIterator<(V, K)>,
{
    original
        .into_iter()
        .map(|(key, value)| (value, key))
        .collect()
}

/// A two-way mapping between class ids and class name labels
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct Labels {
    /// A map from class ids to class name labels
    pub id2label: BTreeMap<usize, String>,

    /// A reverse map from class name labels to class ids
    pub label2id: HashMap<String, usize>,
}

impl Labels {
    /// Assign ids to labels in order, trimming surrounding whitespace
    pub fn new(labels: &[String]) -> Self {
        let id2label = labels
            .iter()
            .enumerate()
            .map(|(i, s)| (i, s.trim().to_string()))
            .collect::<BTreeMap<_, _>>();

        let label2id = invert_map(id2label.clone());

        Self { id2label, label2id }
    }

    /// The number of classes
    pub fn len(&self) -> usize {
        self.id2label.len()
    }

    /// Whether no classes are defined
    pub fn is_empty(&self) -> bool {
        self.id2label.is_empty()
    }

    /// The label for a class id
    pub fn label(&self, id: usize) -> Option<&str> {
        self.id2label.get(&id).map(String::as_str)
    }

    /// The class id for a label
    pub fn id(&self, label: &str) -> Option<usize> {
        self.label2id.get(label).copied()
    }

    /// Map class ids to labels, falling back to the id itself when it has no label
    pub fn decode(&self, ids: &[usize]) -> Vec<String> {
        ids.iter()
            .map(|id| {
                self.label(*id)
                    .map(str::to_string)
                    .unwrap_or_else(|| id.to_string())
            })
            .collect()
    }
}
