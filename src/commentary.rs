use crate::distribution::Family;

/// A titled block of explanatory text shown under the figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub title: String,
    pub body: String,
}

impl Paragraph {
    fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Paragraph {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Title line followed by the body wrapped at `width` columns.
    pub fn render(&self, width: usize) -> String {
        let mut out = format!("{}:\n", self.title);
        for line in wrap(&self.body, width) {
            out.push_str("  ");
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

pub fn heading(family: &Family) -> &'static str {
    match family {
        Family::Binomial { .. } => "Binomial distribution",
        Family::Exponential { .. } => "Exponential distribution",
        Family::Uniform { .. } => "Uniform distribution",
    }
}

/// Commentary blocks for a scenario; the last one is always the N(0, 1) note.
pub fn for_family(family: &Family) -> Vec<Paragraph> {
    let mut paragraphs = match *family {
        Family::Binomial { .. } => vec![
            Paragraph::new(
                "1 - Binomial distribution with p = 0.1",
                "With a low success probability of p = 0.1 most trials end in failure. The \
                 distribution is skewed, with a large concentration of values close to zero, \
                 because each independent trial succeeds only rarely.",
            ),
            Paragraph::new(
                "2 - Binomial distribution with p = 0.5",
                "Unlike the low-probability case, the binomial distribution with p = 0.5 is \
                 clearly symmetric around its mean. With an even chance of success on each \
                 independent trial, successes and failures are equally likely.",
            ),
        ],
        Family::Exponential { lambda } => vec![Paragraph::new(
            "1 - Exponential distribution",
            format!(
                "The sample histogram for the exponential distribution with λ = {lambda} shows an \
                 exponential decay. The probability of observing a value shrinks exponentially as \
                 we move along the axis: values near the origin are the most likely and values \
                 further out become progressively rarer. This makes the exponential distribution a \
                 natural model for the waiting time between successive events or for radioactive \
                 decay."
            ),
        )],
        Family::Uniform { a, b } => vec![Paragraph::new(
            "1 - Uniform distribution",
            format!(
                "The samples are spread evenly across the whole interval [{a}, {b}]. Any \
                 sub-interval of the same length is equally likely, with no preference for a \
                 particular region. There is no bias towards specific values, and the flat shape \
                 is visible directly in the sample histogram."
            ),
        )],
    };
    paragraphs.push(normal_approximation());
    paragraphs
}

fn normal_approximation() -> Paragraph {
    Paragraph::new(
        "Normal(0, 1) approximation",
        "In every scenario the Central Limit Theorem gives the same insight about sample sums. \
         Even when the original distribution is not normal, the standardized sums tend towards a \
         normal distribution with mean 0 and standard deviation 1, more closely as the sample \
         size grows.",
    )
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
