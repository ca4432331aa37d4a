//! Multi-layer perceptron classifier built on candle.
//!
//! The network is a stack of `Linear` layers with ReLU activations, trained
//! with AdamW on cross-entropy over shuffled minibatches. Autograd, the
//! optimizer and the loss all come from `candle-nn`; this wrapper wires the
//! configured layer sizes together and runs the epoch loop. Weights are
//! initialized from a seeded RNG so a run is reproducible (the CPU device
//! has no seedable RNG of its own).
use anyhow::{anyhow, bail, Result};
use candle_core::{Device, Tensor, Var, D};
use candle_nn::{loss, AdamW, Linear, Module, Optimizer, ParamsAdamW};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::{ModelConfig, ModelType};
use crate::models::classifier_trait::ClassifierModel;

struct Network {
    layers: Vec<Linear>,
}

impl Network {
    fn forward(&self, xs: &Tensor) -> candle_core::Result<Tensor> {
        let last = self.layers.len() - 1;
        let mut xs = xs.clone();
        for (i, layer) in self.layers.iter().enumerate() {
            xs = layer.forward(&xs)?;
            if i < last {
                xs = xs.relu()?;
            }
        }
        Ok(xs)
    }
}

/// Glorot-uniform initialized linear layer. Returns the layer plus the
/// trainable vars backing it.
fn init_linear(
    in_dim: usize,
    out_dim: usize,
    rng: &mut StdRng,
    device: &Device,
) -> Result<(Linear, Vec<Var>)> {
    let bound = (6.0 / (in_dim + out_dim) as f64).sqrt();
    let w_vals: Vec<f32> = (0..out_dim * in_dim)
        .map(|_| rng.gen_range(-bound..bound) as f32)
        .collect();
    let weight = Var::from_tensor(&Tensor::from_vec(w_vals, (out_dim, in_dim), device)?)?;
    let bias = Var::from_tensor(&Tensor::zeros(out_dim, candle_core::DType::F32, device)?)?;

    // Linear keeps handles to the var tensors, so gradients reach the vars.
    let layer = Linear::new(weight.as_tensor().clone(), Some(bias.as_tensor().clone()));
    Ok((layer, vec![weight, bias]))
}

/// Feed-forward neural network classifier delegating to `candle`.
pub struct MlpModel {
    net: Option<Network>,
    device: Device,
    config: ModelConfig,
}

impl MlpModel {
    pub fn new(config: ModelConfig) -> Self {
        MlpModel {
            net: None,
            device: Device::Cpu,
            config,
        }
    }

    fn to_tensor(&self, x: &Array2<f32>) -> Result<Tensor> {
        let (n_rows, n_cols) = x.dim();
        let flat: Vec<f32> = x.iter().copied().collect();
        Ok(Tensor::from_vec(flat, (n_rows, n_cols), &self.device)?)
    }
}

impl ClassifierModel for MlpModel {
    fn fit(&mut self, x: &Array2<f32>, y: &Array1<usize>) -> Result<()> {
        let ModelType::Mlp {
            hidden_layers,
            max_epochs,
            learning_rate,
            batch_size,
            seed,
        } = &self.config.model_type
        else {
            bail!(
                "Expected ModelType::Mlp params, got {:?}",
                self.config.model_type
            );
        };
        let hidden_layers = hidden_layers.clone();
        let (max_epochs, learning_rate, batch_size, seed) =
            (*max_epochs, *learning_rate, *batch_size, *seed);

        let n_samples = x.nrows();
        let n_classes = y.iter().max().map_or(0, |&m| m + 1);
        if n_classes < 2 {
            bail!("Training labels contain fewer than two classes");
        }

        let mut rng = StdRng::seed_from_u64(seed);

        let mut dims = Vec::with_capacity(hidden_layers.len() + 2);
        dims.push(x.ncols());
        dims.extend_from_slice(&hidden_layers);
        dims.push(n_classes);

        let mut layers = Vec::with_capacity(dims.len() - 1);
        let mut vars = Vec::new();
        for pair in dims.windows(2) {
            let (layer, layer_vars) = init_linear(pair[0], pair[1], &mut rng, &self.device)?;
            layers.push(layer);
            vars.extend(layer_vars);
        }
        let net = Network { layers };

        let x_t = self.to_tensor(x)?;
        let y_u32: Vec<u32> = y.iter().map(|&v| v as u32).collect();
        let y_t = Tensor::from_vec(y_u32, n_samples, &self.device)?;

        let params = ParamsAdamW {
            lr: learning_rate,
            ..Default::default()
        };
        let mut opt = AdamW::new(vars, params)?;

        let batch = batch_size.clamp(1, n_samples);
        let mut indices: Vec<usize> = (0..n_samples).collect();

        for epoch in 0..max_epochs {
            indices.shuffle(&mut rng);
            let mut epoch_loss = 0f32;
            let mut n_batches = 0usize;

            for chunk in indices.chunks(batch) {
                let idx: Vec<u32> = chunk.iter().map(|&i| i as u32).collect();
                let idx_t = Tensor::from_vec(idx, chunk.len(), &self.device)?;
                let x_batch = x_t.index_select(&idx_t, 0)?;
                let y_batch = y_t.index_select(&idx_t, 0)?;

                let logits = net.forward(&x_batch)?;
                let batch_loss = loss::cross_entropy(&logits, &y_batch)?;
                opt.backward_step(&batch_loss)?;

                epoch_loss += batch_loss.to_scalar::<f32>()?;
                n_batches += 1;
            }

            if (epoch + 1) % 100 == 0 || epoch + 1 == max_epochs {
                log::debug!(
                    "Epoch {}/{}: mean loss {:.5}",
                    epoch + 1,
                    max_epochs,
                    epoch_loss / n_batches.max(1) as f32
                );
            }
        }

        self.net = Some(net);
        Ok(())
    }

    fn predict(&self, x: &Array2<f32>) -> Result<Array1<usize>> {
        let net = self
            .net
            .as_ref()
            .ok_or_else(|| anyhow!("MLP model has not been fitted"))?;
        let logits = net.forward(&self.to_tensor(x)?)?;
        let predicted = logits.argmax(D::Minus1)?.to_vec1::<u32>()?;
        Ok(Array1::from_vec(
            predicted.into_iter().map(|v| v as usize).collect(),
        ))
    }

    fn name(&self) -> &str {
        "mlp"
    }
}
