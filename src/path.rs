//!
//! Dotted attribute paths.
//!
//! `"author.profile.bio"` walks two relation steps and addresses the
//! `bio` attribute of whatever the walk ends on. A step that cannot be
//! resolved stops the walk at the current node, it is not an error.
//!
use crate::record::Record;
use log::debug;

/// Split a dotted path into relation steps and the final attribute.
pub fn split(path: &str) -> (Vec<&str>, &str) {
    match path.rsplit_once('.') {
        Some((head, attr)) => (head.split('.').collect(), attr),
        None => (Vec::new(), path),
    }
}

/// Resolve a dotted path against a root entity.
///
/// Returns the deepest reachable entity and the attribute name. Each
/// relation step must be a nested container holding the next key; a
/// missing step halts the walk at the current node.
pub fn resolve_mut<'a>(root: &'a mut dyn Record, path: &str) -> (&'a mut dyn Record, String) {
    let (steps, attr) = split(path);

    let depth = resolvable_depth(&*root, &steps);
    if depth < steps.len() {
        debug!(
            "path {:?} stops after {} of {} steps",
            path,
            depth,
            steps.len()
        );
    }

    let mut entity: &mut dyn Record = root;
    for step in &steps[..depth] {
        entity = match entity.child_mut(step) {
            Some(child) => child,
            None => unreachable!(),
        };
    }

    (entity, attr.to_string())
}

/// How many relation steps actually resolve.
fn resolvable_depth(root: &dyn Record, steps: &[&str]) -> usize {
    let mut entity = root;
    let mut depth = 0;
    for step in steps {
        match entity.child(step) {
            Some(child) => {
                entity = child;
                depth += 1;
            }
            None => break,
        }
    }
    depth
}

#[cfg(test)]
mod tests {
    use crate::path::{resolve_mut, split};
    use crate::record::Record;
    use serde_json::{json, Value};

    fn sample() -> Value {
        json!({
            "id": 1,
            "a": {
                "id": 2,
                "b": {
                    "id": 3,
                    "c": "deep"
                }
            }
        })
    }

    #[test]
    fn test_split() {
        assert_eq!(split("title"), (vec![], "title"));
        assert_eq!(split("a.b.c"), (vec!["a", "b"], "c"));
        assert_eq!(split("a..c"), (vec!["a", ""], "c"));
    }

    #[test]
    fn test_nested_mapping() {
        let mut data = sample();
        let root = data.as_object_mut().expect("map");

        let (entity, attr) = resolve_mut(root, "a.b.c");
        assert_eq!(attr, "c");
        assert_eq!(entity.get("id"), Some(json!(3)));
        assert_eq!(entity.get("c"), Some(json!("deep")));
    }

    #[test]
    fn test_single_segment() {
        let mut data = sample();
        let root = data.as_object_mut().expect("map");

        let (entity, attr) = resolve_mut(root, "id");
        assert_eq!(attr, "id");
        assert_eq!(entity.get("id"), Some(json!(1)));
    }

    #[test]
    fn test_missing_step_halts() {
        let mut data = sample();
        let root = data.as_object_mut().expect("map");

        // 'x' is unresolvable, the walk stays on the node under 'a'
        // and operates on that. 'c' is then addressed there.
        let (entity, attr) = resolve_mut(root, "a.x.c");
        assert_eq!(attr, "c");
        assert_eq!(entity.get("id"), Some(json!(2)));
        assert_eq!(entity.get("c"), None);
    }

    #[test]
    fn test_scalar_step_halts() {
        let mut data = sample();
        let root = data.as_object_mut().expect("map");

        // 'id' exists but is a scalar, not a container.
        let (entity, attr) = resolve_mut(root, "id.c");
        assert_eq!(attr, "c");
        assert_eq!(entity.get("id"), Some(json!(1)));
    }

    #[test]
    fn test_write_through() {
        let mut data = sample();
        let root = data.as_object_mut().expect("map");

        let (entity, attr) = resolve_mut(root, "a.b.c");
        entity.set(&attr, json!("changed"));

        assert_eq!(data["a"]["b"]["c"], json!("changed"));
    }
}
