/// Decoding lattice for a single observation sequence.
///
/// All scores are natural logarithms. Matrices are flat and row-major.
#[derive(Debug, Default)]
pub(crate) struct Context {
    /// The number of distinct tags (L).
    pub num_labels: usize,

    /// The number of items (T) in the sequence.
    pub num_items: usize,

    /// Emission scores.
    /// This is a [T][L] matrix whose element [t][l] is the log probability
    /// of tag #l emitting the observation at #t.
    pub state: Vec<f64>,

    /// Transition scores.
    /// This is a [L][L] matrix whose element [i][j] is the log probability
    /// of moving from tag #i to tag #j.
    pub trans: Vec<f64>,

    /// Log probability of each tag following START.
    pub start: Vec<f64>,

    /// Log probability of END following each tag.
    pub end: Vec<f64>,

    /// Best score matrix.
    /// This is a [T][L] matrix whose element [t][l] is the score of the best
    /// path from START arriving at (t, l).
    best_score: Vec<f64>,

    /// Back pointers.
    /// This is a [T][L] matrix whose element [t][l] is the tag at #t-1 on
    /// the best path arriving at (t, l).
    backward_edge: Vec<usize>,
}

impl Context {
    pub fn new(num_labels: usize, num_items: usize) -> Self {
        let cells = num_labels * num_items;
        Self {
            num_labels,
            num_items,
            state: vec![0.0; cells],
            trans: vec![0.0; num_labels * num_labels],
            start: vec![0.0; num_labels],
            end: vec![0.0; num_labels],
            best_score: vec![f64::NEG_INFINITY; cells],
            backward_edge: vec![0; cells],
        }
    }

    #[inline]
    fn at(&self, t: usize, l: usize) -> usize {
        self.num_labels * t + l
    }

    /// Fills `labels` with the best tag path and returns its score, which
    /// includes the START and END transitions.
    ///
    /// Ties go to the lowest tag id. Requires `num_items >= 1`,
    /// `num_labels >= 1` and `labels.len() == num_items`.
    pub fn viterbi(&mut self, labels: &mut [usize]) -> f64 {
        let n = self.num_items;
        let l = self.num_labels;
        debug_assert!(n > 0 && l > 0 && labels.len() == n);

        // Scores at (0, *).
        for j in 0..l {
            self.best_score[j] = self.start[j] + self.state[j];
        }

        // Scores at (t, *).
        for t in 1..n {
            for j in 0..l {
                let mut max_score = f64::NEG_INFINITY;
                let mut argmax = 0;
                for i in 0..l {
                    // Transit from (t-1, i) to (t, j).
                    let score = self.best_score[self.at(t - 1, i)] + self.trans[l * i + j];
                    if max_score < score {
                        max_score = score;
                        argmax = i;
                    }
                }
                let k = self.at(t, j);
                self.backward_edge[k] = argmax;
                self.best_score[k] = max_score + self.state[k];
            }
        }

        // The node (n-1, i) that reaches END with the maximum score.
        let mut max_score = f64::NEG_INFINITY;
        labels[n - 1] = 0;
        for i in 0..l {
            let score = self.best_score[self.at(n - 1, i)] + self.end[i];
            if max_score < score {
                max_score = score;
                labels[n - 1] = i;
            }
        }

        for t in (0..n - 1).rev() {
            labels[t] = self.backward_edge[self.at(t + 1, labels[t + 1])];
        }
        max_score
    }

    /// Score of a fixed tag path, END transition included.
    pub fn score(&self, labels: &[usize]) -> f64 {
        assert!(!labels.is_empty(), "empty labels");
        let l = self.num_labels;

        let mut i = labels[0];
        let mut r = self.start[i] + self.state[i];
        for (t, &j) in labels.iter().enumerate().skip(1) {
            r += self.trans[l * i + j];
            r += self.state[self.at(t, j)];
            i = j;
        }
        r + self.end[i]
    }
}
