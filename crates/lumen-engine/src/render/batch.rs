use std::ops::Range;

/// Pipeline a run of instances is drawn with.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BatchKind {
    Shape,
    Text,
}

/// Contiguous instance range drawn with one pipeline.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Batch {
    pub kind: BatchKind,
    /// Range into that pipeline's instance buffer.
    pub instances: Range<u32>,
}

/// Groups per-command instance counts, in paint order, into batches.
///
/// Adjacent runs of the same kind merge; a change of kind starts a new batch,
/// which preserves paint order across pipelines. Zero-instance commands are
/// skipped without breaking a run.
pub fn plan_batches(runs: impl IntoIterator<Item = (BatchKind, u32)>) -> Vec<Batch> {
    let mut batches: Vec<Batch> = Vec::new();
    let mut shape_cursor = 0u32;
    let mut text_cursor = 0u32;

    for (kind, count) in runs {
        if count == 0 {
            continue;
        }
        let cursor = match kind {
            BatchKind::Shape => &mut shape_cursor,
            BatchKind::Text => &mut text_cursor,
        };
        let start = *cursor;
        *cursor += count;

        match batches.last_mut() {
            Some(last) if last.kind == kind => last.instances.end = *cursor,
            _ => batches.push(Batch { kind, instances: start..*cursor }),
        }
    }

    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use BatchKind::{Shape, Text};

    #[test]
    fn same_kind_merges() {
        let b = plan_batches([(Shape, 1), (Shape, 1), (Shape, 1)]);
        assert_eq!(b, vec![Batch { kind: Shape, instances: 0..3 }]);
    }

    #[test]
    fn interleaving_preserves_order() {
        let b = plan_batches([(Shape, 1), (Text, 5), (Shape, 1), (Text, 2)]);
        assert_eq!(
            b,
            vec![
                Batch { kind: Shape, instances: 0..1 },
                Batch { kind: Text, instances: 0..5 },
                Batch { kind: Shape, instances: 1..2 },
                Batch { kind: Text, instances: 5..7 },
            ]
        );
    }

    #[test]
    fn empty_runs_do_not_split() {
        let b = plan_batches([(Shape, 1), (Text, 0), (Shape, 1)]);
        assert_eq!(b, vec![Batch { kind: Shape, instances: 0..2 }]);
    }

    #[test]
    fn nothing_in_nothing_out() {
        assert!(plan_batches(std::iter::empty()).is_empty());
    }
}
