//! Drives the connection loop end to end against a scripted transport.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use letterwheel_client::ws::{Connector, Transport};
use letterwheel_client::{
    Alphabet, ConnectionManager, ConnectionState, Phase, QuestionView, ReconnectPolicy, Renderer,
    SessionConfig,
};
use letterwheel_shared::{
    CircleGeometry, ClientMessage, GameOverStats, Language, TransportError,
};
use serde_json::json;
use tokio::time::Instant;

// ── Mock transport ──────────────────────────────────────────────────

enum Incoming {
    Frame(String),
    /// Keep the connection open, idle, for this long.
    Pause(Duration),
    PauseUntil(Instant),
}

enum Script {
    Refuse,
    Open(Vec<Incoming>),
}

type SentLog = Rc<RefCell<Vec<(Instant, String)>>>;

struct MockTransport {
    incoming: VecDeque<Incoming>,
    sent: SentLog,
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&mut self, frame: String) -> Result<(), TransportError> {
        self.sent.borrow_mut().push((Instant::now(), frame));
        Ok(())
    }

    async fn recv(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            // Script exhausted: the server closes the connection
            match self.incoming.front_mut()? {
                Incoming::Frame(_) => {
                    let Some(Incoming::Frame(frame)) = self.incoming.pop_front() else {
                        unreachable!();
                    };
                    return Some(Ok(frame));
                }
                Incoming::Pause(duration) => {
                    let deadline = Instant::now() + *duration;
                    self.incoming[0] = Incoming::PauseUntil(deadline);
                }
                Incoming::PauseUntil(deadline) => {
                    tokio::time::sleep_until(*deadline).await;
                    self.incoming.pop_front();
                }
            }
        }
    }
}

#[derive(Default)]
struct MockConnector {
    scripts: RefCell<VecDeque<Script>>,
    connects: RefCell<Vec<Instant>>,
    sent: RefCell<Vec<SentLog>>,
}

impl MockConnector {
    fn new(scripts: Vec<Script>) -> Self {
        Self {
            scripts: RefCell::new(scripts.into()),
            ..Self::default()
        }
    }

    /// Messages the client sent on connection `index`.
    fn sent_on(&self, index: usize) -> Vec<ClientMessage> {
        self.sent_at_on(index)
            .into_iter()
            .map(|(_, message)| message)
            .collect()
    }

    /// Like [`sent_on`](Self::sent_on), with the time each frame was written.
    fn sent_at_on(&self, index: usize) -> Vec<(Instant, ClientMessage)> {
        self.sent.borrow()[index]
            .borrow()
            .iter()
            .map(|(at, frame)| (*at, serde_json::from_str(frame).unwrap()))
            .collect()
    }
}

#[async_trait(?Send)]
impl Connector for MockConnector {
    type Transport = MockTransport;

    async fn connect(&self, _url: &str) -> Result<MockTransport, TransportError> {
        self.connects.borrow_mut().push(Instant::now());
        match self.scripts.borrow_mut().pop_front() {
            Some(Script::Open(incoming)) => {
                let sent = Rc::new(RefCell::new(Vec::new()));
                self.sent.borrow_mut().push(sent.clone());
                Ok(MockTransport {
                    incoming: incoming.into(),
                    sent,
                })
            }
            Some(Script::Refuse) | None => Err(TransportError::Connect("refused".to_string())),
        }
    }
}

// ── Recording renderer ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Rendered {
    Circle(Vec<String>),
    Question { letter: String, timer: String },
    Timer(String),
    GameOver(GameOverStats),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Rendered>,
    questions_at: Vec<Instant>,
}

impl Renderer for Recorder {
    fn render_circle(&mut self, alphabet: &Alphabet) {
        self.calls
            .push(Rendered::Circle(alphabet.letters().map(String::from).collect()));
    }

    fn render_question(&mut self, view: &QuestionView) {
        self.questions_at.push(Instant::now());
        self.calls.push(Rendered::Question {
            letter: view.letter.clone(),
            timer: view.timer.clone(),
        });
    }

    fn render_timer(&mut self, timer: &str) {
        self.calls.push(Rendered::Timer(timer.to_string()));
    }

    fn render_game_over(&mut self, stats: &GameOverStats) {
        self.calls.push(Rendered::GameOver(*stats));
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn manager(language: Language, policy: ReconnectPolicy) -> ConnectionManager<Recorder> {
    let config = SessionConfig {
        ws_url: "ws://localhost:8080/ws".to_string(),
        language,
        session_id: None,
        reconnect: policy,
        circle: CircleGeometry::default(),
    };
    ConnectionManager::new(config, Recorder::default())
}

fn question(letter: &str, letters: &[&str], time: u32) -> Incoming {
    let state: serde_json::Map<String, serde_json::Value> = letters
        .iter()
        .map(|l| (l.to_string(), json!("")))
        .collect();
    Incoming::Frame(
        json!({
            "type": "QUESTION",
            "payload": {
                "letter": letter,
                "question": format!("Starts with {}", letter),
                "lettersState": state,
                "timeRemaining": time,
            }
        })
        .to_string(),
    )
}

fn frame(value: serde_json::Value) -> Incoming {
    Incoming::Frame(value.to_string())
}

fn init(language: Language) -> ClientMessage {
    ClientMessage::Init {
        language,
        session_id: None,
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn reconnects_after_fixed_delay_and_resends_init() {
    let connector = MockConnector::new(vec![
        Script::Open(vec![question("Ç", &["A", "B", "Ç"], 300)]),
        Script::Open(vec![question("B", &["A", "B", "Ç"], 290)]),
        Script::Refuse,
    ]);
    let mut m = manager(Language::Tr, ReconnectPolicy::default().with_max_attempts(1));

    m.run(&connector).await;

    let connects = connector.connects.borrow();
    assert_eq!(connects.len(), 3);
    for pair in connects.windows(2) {
        assert_eq!(pair[1] - pair[0], Duration::from_millis(2000));
    }

    assert_eq!(connector.sent_on(0), vec![init(Language::Tr)]);
    assert_eq!(connector.sent_on(1), vec![init(Language::Tr)]);
    assert_eq!(m.connections(), 2);
    assert_eq!(m.state(), ConnectionState::Closed);

    // The circle survives the reconnect; only the question is refreshed
    let calls = &m.dispatcher().renderer().calls;
    assert_eq!(
        calls,
        &vec![
            Rendered::Circle(vec!["A".into(), "B".into(), "Ç".into()]),
            Rendered::Question {
                letter: "Ç".into(),
                timer: "05:00".into()
            },
            Rendered::Question {
                letter: "B".into(),
                timer: "04:50".into()
            },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn refused_connections_are_retried_until_the_policy_gives_up() {
    let connector = MockConnector::new(vec![Script::Refuse, Script::Refuse, Script::Refuse]);
    let mut m = manager(
        Language::En,
        ReconnectPolicy::fixed(2000).with_max_attempts(2),
    );

    let started = Instant::now();
    m.run(&connector).await;

    assert_eq!(connector.connects.borrow().len(), 3);
    assert_eq!(started.elapsed(), Duration::from_millis(4000));
    assert_eq!(m.connections(), 0);
    assert!(m.dispatcher().renderer().calls.is_empty());
}

#[tokio::test(start_paused = true)]
async fn user_actions_are_sent_while_open() {
    let connector = MockConnector::new(vec![Script::Open(vec![
        question("A", &["A", "B"], 300),
        Incoming::Pause(Duration::from_secs(1)),
    ])]);
    let mut m = manager(Language::En, ReconnectPolicy::fixed(10).with_max_attempts(1));
    let handle = m.handle();

    let user = async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(handle.submit_answer(""), Ok(false));
        assert_eq!(handle.submit_answer("abc"), Ok(true));
        handle.pass_question().unwrap();
    };
    tokio::join!(m.run(&connector), user);

    assert_eq!(
        connector.sent_on(0),
        vec![
            init(Language::En),
            ClientMessage::Answer {
                answer: "abc".to_string()
            },
            ClientMessage::Pass,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn pass_before_the_first_question_is_still_sent() {
    let connector = MockConnector::new(vec![Script::Open(vec![
        Incoming::Pause(Duration::from_secs(1)),
        question("A", &["A", "B"], 300),
    ])]);
    let mut m = manager(Language::En, ReconnectPolicy::fixed(10).with_max_attempts(1));
    let handle = m.handle();

    let started = Instant::now();
    let user = async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        handle.pass_question().unwrap();
    };
    tokio::join!(m.run(&connector), user);

    let sent = connector.sent_at_on(0);
    assert_eq!(
        sent.iter().map(|(_, message)| message.clone()).collect::<Vec<_>>(),
        vec![init(Language::En), ClientMessage::Pass]
    );

    // PASS went out while no question had been applied yet
    let pass_at = sent[1].0;
    assert_eq!(pass_at - started, Duration::from_millis(500));
    let questions_at = &m.dispatcher().renderer().questions_at;
    assert_eq!(questions_at.len(), 1);
    assert!(questions_at[0] > pass_at);
    assert_eq!(m.dispatcher().phase(), Phase::Playing);
}

#[tokio::test(start_paused = true)]
async fn game_over_freezes_the_session() {
    let connector = MockConnector::new(vec![Script::Open(vec![
        question("A", &["A", "B"], 120),
        frame(json!({"type": "TIMER_SYNC", "payload": {"timeRemaining": 119}})),
        frame(json!({"type": "FEEDBACK", "payload": {"letter": "A", "status": "green", "correct": true}})),
        frame(json!({
            "type": "GAME_OVER",
            "payload": {"correctCount": 1, "wrongCount": 0, "passedCount": 1}
        })),
        question("B", &["A", "B"], 100),
        frame(json!({"type": "TIMER_SYNC", "payload": {"timeRemaining": 99}})),
    ])]);
    let mut m = manager(Language::En, ReconnectPolicy::fixed(10).with_max_attempts(1));

    m.run(&connector).await;

    let dispatcher = m.dispatcher();
    assert_eq!(dispatcher.phase(), Phase::GameOver);
    assert_eq!(
        dispatcher.renderer().calls,
        vec![
            Rendered::Circle(vec!["A".into(), "B".into()]),
            Rendered::Question {
                letter: "A".into(),
                timer: "02:00".into()
            },
            Rendered::Timer("01:59".into()),
            Rendered::GameOver(GameOverStats {
                correct_count: 1,
                wrong_count: 0,
                passed_count: 1,
            }),
        ]
    );
    let snapshot = dispatcher.store().snapshot().unwrap();
    assert_eq!(snapshot.current_letter, "A");
    assert_eq!(snapshot.time_remaining, 119);
}

#[tokio::test(start_paused = true)]
async fn malformed_frames_do_not_end_the_connection() {
    let connector = MockConnector::new(vec![Script::Open(vec![
        Incoming::Frame("{{ definitely not json".to_string()),
        question("Q", &["A", "B"], 300),
        frame(json!({"type": "HELLO", "payload": {"motd": "hi"}})),
        question("B", &["A", "B"], 300),
    ])]);
    let mut m = manager(Language::En, ReconnectPolicy::fixed(10).with_max_attempts(1));

    m.run(&connector).await;

    assert_eq!(m.connections(), 1);
    assert_eq!(
        m.dispatcher().renderer().calls,
        vec![
            Rendered::Circle(vec!["A".into(), "B".into()]),
            Rendered::Question {
                letter: "B".into(),
                timer: "05:00".into()
            },
        ]
    );
}
