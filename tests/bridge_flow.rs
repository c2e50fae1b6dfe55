use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use intent_bridge::{
    Cursor, DocumentProvider, Event, FnSink, IntentBridge, ResourceUri, Selection,
};

/// Provider answering `_data` queries from a fixed table.
struct TableProvider {
    data: HashMap<String, String>,
}

struct OneRow(Option<String>);

impl Cursor for OneRow {
    fn move_to_first(&mut self) -> Result<bool, String> {
        Ok(true)
    }
    fn column_index(&mut self, _name: &str) -> Result<Option<usize>, String> {
        Ok(Some(0))
    }
    fn get_string(&mut self, _index: usize) -> Result<Option<String>, String> {
        Ok(self.0.take())
    }
    fn close(&mut self) {}
}

impl DocumentProvider for TableProvider {
    fn query(
        &self,
        uri: &ResourceUri,
        _projection: &[&str],
        _selection: Option<&Selection>,
    ) -> Result<Option<Box<dyn Cursor + '_>>, String> {
        Ok(self
            .data
            .get(uri.as_str())
            .map(|path| Box::new(OneRow(Some(path.clone()))) as Box<dyn Cursor + '_>))
    }

    fn external_storage_directory(&self) -> Option<PathBuf> {
        Some(PathBuf::from("/storage/emulated/0"))
    }
}

type Received = Rc<RefCell<Vec<String>>>;

fn new_bridge() -> (IntentBridge<TableProvider, FnSink<impl Fn(&str)>>, Received) {
    let received: Received = Rc::default();
    let sink_received = received.clone();
    let provider = TableProvider {
        data: HashMap::from([(
            "content://downloads/public_downloads/5".to_string(),
            "/storage/emulated/0/Download/five.mp3".to_string(),
        )]),
    };
    let sink = FnSink(move |path: &str| sink_received.borrow_mut().push(path.to_string()));
    (IntentBridge::new(provider, sink), received)
}

fn view(n: usize) -> Event {
    Event::new(
        Some("android.intent.action.VIEW"),
        Some(&format!("file:///music/{}.mp3", n)),
    )
}

#[derive(Clone, Copy, Debug)]
enum Step {
    Launch,
    Running,
}

/// All step sequences up to `max_len` (at most one launch, always first).
fn sequences(max_len: usize) -> Vec<Vec<Step>> {
    let mut frontier: Vec<Vec<Step>> = vec![vec![], vec![Step::Launch]];
    let mut out = frontier.clone();
    for _ in 0..max_len {
        let mut next = Vec::new();
        for seq in &frontier {
            let mut extended = seq.clone();
            extended.push(Step::Running);
            next.push(extended);
        }
        out.extend(next.iter().cloned());
        frontier = next;
    }
    out
}

#[test]
fn test_at_most_one_forward_for_latest_event() {
    for seq in sequences(4) {
        let (mut bridge, received) = new_bridge();
        let mut latest = None;
        for (n, step) in seq.iter().enumerate() {
            match step {
                Step::Launch => bridge.on_app_launched_with_event(Some(view(n))),
                Step::Running => bridge.on_event_while_running(view(n)),
            }
            latest = Some(n);
        }
        assert!(received.borrow().is_empty(), "forwarded before ready: {:?}", seq);

        bridge.on_core_ready();
        let expected: Vec<String> = latest
            .map(|n| vec![format!("/music/{}.mp3", n)])
            .unwrap_or_default();
        assert_eq!(*received.borrow(), expected, "sequence {:?}", seq);

        bridge.on_core_ready();
        assert_eq!(*received.borrow(), expected, "second ready forwarded again: {:?}", seq);
    }
}

#[test]
fn test_ready_first_then_events_forward_immediately() {
    let (mut bridge, received) = new_bridge();
    bridge.on_core_ready();
    assert!(received.borrow().is_empty());

    bridge.on_event_while_running(view(1));
    assert_eq!(*received.borrow(), vec!["/music/1.mp3"]);

    bridge.on_event_while_running(Event::new(
        Some("android.intent.action.EDIT"),
        Some("content://com.android.providers.downloads.documents/document/5"),
    ));
    assert_eq!(
        *received.borrow(),
        vec!["/music/1.mp3", "/storage/emulated/0/Download/five.mp3"]
    );
}

#[test]
fn test_external_storage_document_path() {
    let (bridge, _) = new_bridge();
    let event = Event::new(
        Some("android.intent.action.VIEW"),
        Some("content://com.android.externalstorage.documents/document/primary%3AMusic%2Fsong.mp3"),
    );
    assert_eq!(
        bridge.resolve(&event).map(|p| p.into_string()).as_deref(),
        Some("/storage/emulated/0/Music/song.mp3")
    );
}

#[test]
fn test_file_uri_path_is_exact() {
    let (bridge, _) = new_bridge();
    let event = Event::new(Some("android.intent.action.VIEW"), Some("file:///a/b.mp3"));
    assert_eq!(
        bridge.resolve(&event).map(|p| p.into_string()).as_deref(),
        Some("/a/b.mp3")
    );
}

#[test]
fn test_non_view_action_never_forwards() {
    let (mut bridge, received) = new_bridge();
    bridge.on_app_launched_with_event(Some(Event::new(
        Some("android.intent.action.MAIN"),
        Some("file:///a/b.mp3"),
    )));
    bridge.on_core_ready();
    bridge.on_event_while_running(Event::new(
        Some("android.intent.action.SEND"),
        Some("file:///a/b.mp3"),
    ));
    assert!(received.borrow().is_empty());
}
