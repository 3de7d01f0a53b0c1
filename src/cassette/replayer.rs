//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port, method and target path.
///
/// Files are processed by a worker pool, so calls for different paths
/// arrive in arbitrary order. Interactions for the same path keep their
/// recorded order.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct InteractionKey {
    port: String,
    method: String,
    path: Option<String>,
}

impl InteractionKey {
    fn new(port: &str, method: &str, path: Option<&str>) -> Self {
        Self { port: port.to_string(), method: method.to_string(), path: path.map(str::to_string) }
    }
}

/// Replays interactions from a loaded cassette, serving them sequentially
/// per port/method/path triple.
pub struct CassetteReplayer {
    /// Per key queue of interactions (in order).
    queues: HashMap<InteractionKey, Vec<Interaction>>,
    /// Per key cursor tracking position.
    cursors: HashMap<InteractionKey, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<InteractionKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = InteractionKey::new(&interaction.port, &interaction.method, interaction.path());
            queues.entry(key).or_default().push(interaction.clone());
        }
        let cursors = queues.keys().map(|k| (k.clone(), 0)).collect();
        Self { queues, cursors }
    }

    /// Return the next interaction for the given port, method and path.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the given
    /// combination, printing what was requested versus what is available.
    pub fn next_interaction(&mut self, port: &str, method: &str, path: Option<&str>) -> &Interaction {
        let key = InteractionKey::new(port, method, path);

        let queue = self.queues.get(&key).unwrap_or_else(|| {
            let mut available: Vec<String> = self
                .queues
                .keys()
                .map(|k| format!("{}::{}({})", k.port, k.method, k.path.as_deref().unwrap_or("")))
                .collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?} \
                 path={path:?}. Available: [{}]",
                available.join(", ")
            );
        });

        let cursor = self.cursors.get_mut(&key).expect("cursor must exist");
        assert!(
            *cursor < queue.len(),
            "Cassette exhausted: all {count} interactions for port={port:?} method={method:?} \
             path={path:?} have been consumed. Last interaction was seq={last_seq}.",
            count = queue.len(),
            last_seq = queue.last().map_or(0, |i| i.seq),
        );

        let interaction = &queue[*cursor];
        *cursor += 1;
        interaction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette { name: "test".into(), recorded_at: Utc::now(), interactions }
    }

    fn read(seq: u64, path: &str, text: &str) -> Interaction {
        Interaction {
            seq,
            port: "fs".into(),
            method: "read_to_string".into(),
            input: json!({"path": path}),
            output: json!({"ok": text}),
        }
    }

    #[test]
    fn serves_per_path_in_recorded_order_regardless_of_call_order() {
        let cassette = make_cassette(vec![
            read(0, "/p/A.cs", "a1"),
            read(1, "/p/B.cs", "b1"),
            read(2, "/p/A.cs", "a2"),
        ]);
        let mut replayer = CassetteReplayer::new(&cassette);

        assert_eq!(replayer.next_interaction("fs", "read_to_string", Some("/p/B.cs")).seq, 1);
        assert_eq!(replayer.next_interaction("fs", "read_to_string", Some("/p/A.cs")).seq, 0);
        let last = replayer.next_interaction("fs", "read_to_string", Some("/p/A.cs"));
        assert_eq!(last.output, json!({"ok": "a2"}));
    }

    #[test]
    #[should_panic(expected = "Cassette exhausted")]
    fn exhausted_replayer_panics_with_descriptive_message() {
        let cassette = make_cassette(vec![read(0, "/p/A.cs", "a")]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("fs", "read_to_string", Some("/p/A.cs"));
        let _ = replayer.next_interaction("fs", "read_to_string", Some("/p/A.cs"));
    }

    #[test]
    #[should_panic(expected = "no interactions recorded")]
    fn unknown_path_panics() {
        let cassette = make_cassette(vec![read(0, "/p/A.cs", "a")]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("fs", "read_to_string", Some("/p/Other.cs"));
    }
}
