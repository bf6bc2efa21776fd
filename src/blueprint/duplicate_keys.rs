use std::collections::HashSet;

use saphyr_parser::{Event, EventReceiver, Parser, ScanError};

use super::node::entry_label;

enum Frame {
    Mapping {
        label: String,
        keys: HashSet<String>,
        awaiting_key: bool,
        current_key: Option<String>,
    },
    Sequence {
        label: String,
    },
}

/// Tracks the keys of every open mapping in the first document.
#[derive(Default)]
struct DuplicateKeyFinder {
    frames: Vec<Frame>,
    finished: bool,
    duplicate: Option<String>,
}

impl DuplicateKeyFinder {
    /// Label of a collection that starts at the current position
    fn child_label(&self) -> String {
        match self.frames.last() {
            Some(Frame::Mapping {
                label,
                awaiting_key: false,
                current_key: Some(key),
                ..
            }) => entry_label(label, key),
            Some(Frame::Mapping { label, .. } | Frame::Sequence { label }) => label.clone(),
            None => String::new(),
        }
    }

    fn node_finished(&mut self) {
        if let Some(Frame::Mapping { awaiting_key, .. }) = self.frames.last_mut() {
            *awaiting_key = !*awaiting_key;
        }
    }

    fn on_scalar(&mut self, value: &str) {
        if let Some(Frame::Mapping {
            label,
            keys,
            awaiting_key: true,
            current_key,
        }) = self.frames.last_mut()
        {
            if !keys.insert(value.to_string()) && self.duplicate.is_none() {
                self.duplicate = Some(entry_label(label, value));
            }
            *current_key = Some(value.to_string());
        }
        self.node_finished();
    }
}

impl<'input> EventReceiver<'input> for DuplicateKeyFinder {
    fn on_event(&mut self, ev: Event<'input>) {
        if self.finished {
            return;
        }

        match ev {
            Event::MappingStart(..) => {
                let label = self.child_label();
                self.frames.push(Frame::Mapping {
                    label,
                    keys: HashSet::new(),
                    awaiting_key: true,
                    current_key: None,
                });
            }
            Event::SequenceStart(..) => {
                let label = self.child_label();
                self.frames.push(Frame::Sequence { label });
            }
            Event::MappingEnd | Event::SequenceEnd => {
                self.frames.pop();
                self.node_finished();
            }
            Event::Scalar(value, ..) => self.on_scalar(&value),
            Event::Alias(_) => {
                if let Some(Frame::Mapping {
                    awaiting_key: true,
                    current_key,
                    ..
                }) = self.frames.last_mut()
                {
                    *current_key = None;
                }
                self.node_finished();
            }
            Event::DocumentEnd => self.finished = true,
            _ => {}
        }
    }
}

/// Returns the `/`-joined label of the first repeated mapping key in the
/// first YAML document of `contents`.
pub(super) fn find_first(contents: &str) -> Result<Option<String>, ScanError> {
    let mut finder = DuplicateKeyFinder::default();
    Parser::new_from_str(contents).load(&mut finder, false)?;
    Ok(finder.duplicate)
}
