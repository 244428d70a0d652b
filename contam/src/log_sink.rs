/*
MIT License
Copyright (c)  Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use model::{print_error, print_warning};
use std::fmt::Display;

/// How bad a message is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Something the user should know about
    Warn,
    /// Something that went wrong
    Error,
}

/// A message recorded in a [`LogSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    /// The level of the message
    pub level: LogLevel,
    /// The text
    pub message: String,
}

/// Forwards messages to the `log` facade and keeps a copy of them,
/// so that they can be inspected after a process is done.
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    module: String,
    messages: Vec<LogMessage>,
}

impl LogSink {
    /// Creates an empty sink. Messages are logged as coming from `module`
    pub fn new<S: Into<String>>(module: S) -> Self {
        Self {
            module: module.into(),
            messages: Vec::new(),
        }
    }

    /// Logs and records a warning
    pub fn warn<T: Display>(&mut self, msg: T) {
        let message = msg.to_string();
        print_warning(&self.module, &message);
        self.messages.push(LogMessage {
            level: LogLevel::Warn,
            message,
        })
    }

    /// Logs and records an error
    pub fn error<T: Display>(&mut self, msg: T) {
        let message = msg.to_string();
        print_error(&self.module, &message);
        self.messages.push(LogMessage {
            level: LogLevel::Error,
            message,
        })
    }

    /// All the recorded messages, in order
    pub fn messages(&self) -> &[LogMessage] {
        &self.messages
    }

    /// The recorded warnings
    pub fn warnings(&self) -> Vec<&str> {
        self.filter(LogLevel::Warn)
    }

    /// The recorded errors
    pub fn errors(&self) -> Vec<&str> {
        self.filter(LogLevel::Error)
    }

    fn filter(&self, level: LogLevel) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.level == level)
            .map(|m| m.message.as_str())
            .collect()
    }

    /// Forgets all messages
    pub fn clear(&mut self) {
        self.messages.clear()
    }
}

/***********/
/* TESTING */
/***********/
