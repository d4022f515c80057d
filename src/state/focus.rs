//! Keyboard focus within the questions on screen

/// Which question and which of its choices has focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageFocus {
    pub question: usize,
    pub choice: usize,
}

impl PageFocus {
    /// Move to the next question (wraps around)
    pub fn next_question(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.question = (self.question + 1) % count;
        self.choice = 0;
    }

    /// Move to the previous question (wraps around)
    pub fn prev_question(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.question = if self.question == 0 {
            count - 1
        } else {
            self.question - 1
        };
        self.choice = 0;
    }

    pub fn next_choice(&mut self, count: usize) {
        if count > 0 {
            self.choice = (self.choice + 1).min(count - 1);
        }
    }

    pub fn prev_choice(&mut self) {
        self.choice = self.choice.saturating_sub(1);
    }

    /// Keep indices in range after the visible questions change
    pub fn clamp(&mut self, question_count: usize) {
        if question_count == 0 {
            *self = Self::default();
        } else if self.question >= question_count {
            self.question = question_count - 1;
            self.choice = 0;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
