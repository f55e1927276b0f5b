use crate::{
    error::{Error, Result},
    hmm::{context::Context, model::Model, DEFAULT_EPSILON, END, START},
    quark::{Quark, StringTable},
};

/// Viterbi decoder over a borrowed [`Model`].
///
/// Any probability the model cannot answer (unknown observation, tag or
/// transition) is replaced by `epsilon` before taking its logarithm.
#[derive(Debug, Clone, Copy)]
pub struct Tagger<'a> {
    model: &'a Model,
    epsilon: f64,
}

impl<'a> Tagger<'a> {
    pub fn new(model: &'a Model) -> Self {
        Self {
            model,
            epsilon: DEFAULT_EPSILON,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Result<Self> {
        if !(epsilon > 0.0 && epsilon <= 1.0) {
            return Err(Error::InvalidParam {
                name: "epsilon".into(),
                value: epsilon.to_string(),
            });
        }
        self.epsilon = epsilon;
        Ok(self)
    }

    /// Sets a parameter by name, e.g. `epsilon=1e-8`.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let invalid = || Error::InvalidParam {
            name: name.to_string(),
            value: value.to_string(),
        };
        match name {
            "epsilon" => {
                let epsilon = value.parse().map_err(|_| invalid())?;
                *self = self.with_epsilon(epsilon).map_err(|_| invalid())?;
                Ok(())
            }
            _ => Err(invalid()),
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn labels(&self) -> &'a Quark {
        self.model.tags()
    }

    /// Builds the log-domain lattice for `xseq`.
    fn context<S: AsRef<str>>(&self, xseq: &[S]) -> Result<Context> {
        let tags = self.model.tags();
        if tags.is_empty() {
            return Err(Error::EmptyModel);
        }
        if xseq.is_empty() {
            return Err(Error::EmptySequence);
        }
        let l = tags.len();
        let n = xseq.len();
        let eps = self.epsilon;
        let trans = self.model.transitions();
        let emit = self.model.emissions();
        log::debug!("viterbi (L: {l}, T: {n})");

        let mut ctx = Context::new(l, n);
        let trans_rows: Vec<_> = tags.iter().map(|tag| trans.row_id(tag)).collect();
        let trans_cols: Vec<_> = tags.iter().map(|tag| trans.col_id(tag)).collect();
        let emit_rows: Vec<_> = tags.iter().map(|tag| emit.row_id(tag)).collect();
        let start = trans.row_id(START);
        let end = trans.col_id(END);

        for j in 0..l {
            ctx.start[j] = trans.lookup_at(start, trans_cols[j], eps).ln();
            ctx.end[j] = trans.lookup_at(trans_rows[j], end, eps).ln();
            for i in 0..l {
                ctx.trans[l * i + j] = trans.lookup_at(trans_rows[i], trans_cols[j], eps).ln();
            }
        }
        for (t, obs) in xseq.iter().enumerate() {
            let col = emit.col_id(obs.as_ref());
            for j in 0..l {
                ctx.state[l * t + j] = emit.lookup_at(emit_rows[j], col, eps).ln();
            }
        }
        Ok(ctx)
    }

    /// The most likely tag sequence for `xseq` and its log joint
    /// probability, end-of-sequence transition included.
    pub fn viterbi<S: AsRef<str>>(&self, xseq: &[S]) -> Result<(Vec<String>, f64)> {
        let mut ctx = self.context(xseq)?;
        let mut labels = vec![0; xseq.len()];
        let score = ctx.viterbi(&mut labels);
        let tags = self.model.tags();
        let yseq = labels
            .into_iter()
            .map(|i| tags.to_str(i).map(str::to_string).ok_or(Error::EmptyModel))
            .collect::<Result<Vec<_>>>()?;
        Ok((yseq, score))
    }

    pub fn tag<S: AsRef<str>>(&self, xseq: &[S]) -> Result<Vec<String>> {
        self.viterbi(xseq).map(|(yseq, _)| yseq)
    }

    /// Log joint probability of `xseq` tagged as `yseq`, START and END
    /// transitions included.
    pub fn score<S: AsRef<str>, L: AsRef<str>>(&self, xseq: &[S], yseq: &[L]) -> Result<f64> {
        if xseq.is_empty() {
            return Err(Error::EmptySequence);
        }
        if xseq.len() != yseq.len() {
            return Err(Error::LengthMismatch {
                observations: xseq.len(),
                tags: yseq.len(),
            });
        }
        if let Some((position, tag)) = yseq
            .iter()
            .map(|tag| tag.as_ref())
            .enumerate()
            .find(|(_, tag)| *tag == START || *tag == END)
        {
            return Err(Error::SentinelInPath {
                position,
                tag: tag.to_string(),
            });
        }

        // Paths over known tags are scored on the lattice the decoder uses.
        let tags = self.model.tags();
        let ids: Option<Vec<usize>> = yseq.iter().map(|tag| tags.to_id(tag.as_ref())).collect();
        if let Some(ids) = ids {
            return Ok(self.context(xseq)?.score(&ids));
        }

        let eps = self.epsilon;
        let trans = self.model.transitions();
        let emit = self.model.emissions();
        let mut prev = START;
        let mut r = 0.0;
        for (obs, tag) in xseq.iter().zip(yseq) {
            let tag = tag.as_ref();
            r += trans.lookup(prev, tag, eps).ln();
            r += emit.lookup(tag, obs.as_ref(), eps).ln();
            prev = tag;
        }
        Ok(r + trans.lookup(prev, END, eps).ln())
    }
}
