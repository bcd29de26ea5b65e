use std::io::{self, Read};
use std::sync::Mutex;
use std::time::Duration;

use log::debug;
use pentris_lib::common::GameController;
use pentris_lib::input::Command;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

// Store original terminal state for restoration
#[cfg(unix)]
static ORIGINAL_TERMIOS: Mutex<Option<libc::termios>> = Mutex::new(None);

// Platform-specific raw terminal setup
#[cfg(unix)]
pub fn enable_raw_mode() {
    use std::os::unix::io::AsRawFd;
    unsafe {
        let fd = io::stdin().as_raw_fd();
        let mut termios: libc::termios = std::mem::zeroed();
        libc::tcgetattr(fd, &mut termios);

        // Save original settings
        if let Ok(mut original) = ORIGINAL_TERMIOS.lock() {
            *original = Some(termios);
        }

        termios.c_lflag &= !(libc::ICANON | libc::ECHO);
        termios.c_cc[libc::VMIN] = 0;
        termios.c_cc[libc::VTIME] = 0;

        libc::tcsetattr(fd, libc::TCSANOW, &termios);

        // Also set stdin to non-blocking mode
        let flags = libc::fcntl(fd, libc::F_GETFL);
        libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK);
    }
    // Hide the cursor while the board is drawn.
    print!("\x1b[?25l");
}

#[cfg(unix)]
pub fn restore_terminal() {
    use std::os::unix::io::AsRawFd;
    let original = ORIGINAL_TERMIOS.lock().ok().and_then(|guard| *guard);
    if let Some(original) = original {
        unsafe {
            let fd = io::stdin().as_raw_fd();
            libc::tcsetattr(fd, libc::TCSANOW, &original);

            // Also restore blocking mode
            let flags = libc::fcntl(fd, libc::F_GETFL);
            libc::fcntl(fd, libc::F_SETFL, flags & !libc::O_NONBLOCK);
        }
    }
    print!("\x1b[?25h");
}

#[cfg(not(unix))]
pub fn enable_raw_mode() {
    // No-op for non-Unix systems
}

#[cfg(not(unix))]
pub fn restore_terminal() {
    // No-op for non-Unix systems
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum KeyEvent {
    Game(Command),
    Quit,
    None,
}

/// Decodes one keypress: a plain byte or an `ESC [ x` arrow sequence.
fn decode_key(first: u8, seq: Option<[u8; 2]>) -> KeyEvent {
    let command = match first {
        27 => match seq {
            Some([91, 65]) => Command::Rotate,    // [A
            Some([91, 66]) => Command::SoftDrop,  // [B
            Some([91, 67]) => Command::MoveRight, // [C
            Some([91, 68]) => Command::MoveLeft,  // [D
            _ => return KeyEvent::None,
        },
        b'\n' | b'\r' => Command::Confirm,
        b'q' | b'Q' => return KeyEvent::Quit,
        other => match Command::from_key(&(other as char).to_string()) {
            Some(command) => command,
            None => return KeyEvent::None,
        },
    };
    KeyEvent::Game(command)
}

pub struct ConsoleController {
    commands: UnboundedReceiver<Command>,
    _input_thread: std::thread::JoinHandle<()>,
}

impl ConsoleController {
    pub fn new() -> Self {
        let (tx, rx) = unbounded_channel();
        let input_thread = std::thread::spawn(move || Self::pump(tx));

        Self {
            commands: rx,
            _input_thread: input_thread,
        }
    }

    fn pump(tx: UnboundedSender<Command>) {
        loop {
            match Self::read_key() {
                KeyEvent::Game(command) => {
                    if tx.send(command).is_err() {
                        return;
                    }
                }
                KeyEvent::Quit => {
                    restore_terminal();
                    println!("\nTerminal restored. Goodbye!");
                    std::process::exit(0);
                }
                KeyEvent::None => {}
            }

            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn read_key() -> KeyEvent {
        let mut buffer = [0; 1];
        let mut stdin = io::stdin();

        // Try to read one character (non-blocking with raw mode)
        match stdin.read(&mut buffer) {
            Ok(1) => {
                let seq = if buffer[0] == 27 {
                    let mut seq = [0; 2];
                    (stdin.read(&mut seq).unwrap_or(0) == 2).then_some(seq)
                } else {
                    None
                };
                let key = decode_key(buffer[0], seq);
                debug!("key {:?}", key);
                key
            }
            _ => KeyEvent::None,
        }
    }
}

impl GameController for ConsoleController {
    fn poll(&mut self) -> Option<Command> {
        self.commands.try_recv().ok()
    }
}
