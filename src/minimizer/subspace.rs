//! Likelihood restricted to the free parameters of a [`ParameterSet`].
//!
//! [`SubspaceLikelihood`] wraps a model whose `θ` spans *all* parameters and
//! exposes a `LogLikelihood` over the free ones only, in internal
//! coordinates. Fixed parameters are taken from a template vector. With
//! identity transforms the internal and external coordinates coincide; this
//! is how HESSE differentiates in external space, and how MINOS profiles
//! hold the scanned parameter fixed.
use crate::{
    minimizer::parameters::{ParamTransform, ParameterSet},
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{Grad, LogLikelihood, Theta},
    },
};

#[derive(Debug, Clone)]
pub struct SubspaceLikelihood<'a, F: LogLikelihood> {
    inner: &'a F,
    template: Theta,
    free: Vec<usize>,
    transforms: Vec<ParamTransform>,
}

impl<'a, F: LogLikelihood> SubspaceLikelihood<'a, F> {
    /// Internal coordinates follow each parameter's bounds.
    ///
    /// # Errors
    /// - [`OptError::NoFreeParameters`] if every parameter is fixed.
    pub fn bounded(inner: &'a F, params: &ParameterSet) -> OptResult<Self> {
        let free = params.free_indices();
        let transforms = free
            .iter()
            .filter_map(|&i| params.get(i))
            .map(|p| p.transform())
            .collect();
        Self::build(inner, params, free, transforms)
    }

    /// Internal coordinates are the external values themselves.
    ///
    /// # Errors
    /// - [`OptError::NoFreeParameters`] if every parameter is fixed.
    pub fn external(inner: &'a F, params: &ParameterSet) -> OptResult<Self> {
        let free = params.free_indices();
        let transforms = vec![ParamTransform::Identity; free.len()];
        Self::build(inner, params, free, transforms)
    }

    fn build(
        inner: &'a F, params: &ParameterSet, free: Vec<usize>, transforms: Vec<ParamTransform>,
    ) -> OptResult<Self> {
        if free.is_empty() {
            return Err(OptError::NoFreeParameters);
        }
        Ok(Self { inner, template: params.values(), free, transforms })
    }

    pub fn dim(&self) -> usize {
        self.free.len()
    }

    pub fn free_indices(&self) -> &[usize] {
        &self.free
    }

    /// Internal start point from the template's free values.
    pub fn initial_internal(&self) -> Theta {
        self.free
            .iter()
            .zip(&self.transforms)
            .map(|(&i, t)| t.to_internal(self.template[i]))
            .collect()
    }

    /// Full external parameter vector for the internal point `z`.
    ///
    /// # Errors
    /// - [`OptError::ThetaLengthMismatch`] if `z` has the wrong length.
    pub fn to_full(&self, z: &Theta) -> OptResult<Theta> {
        if z.len() != self.free.len() {
            return Err(OptError::ThetaLengthMismatch { expected: self.free.len(), actual: z.len() });
        }
        let mut full = self.template.clone();
        for ((&i, t), &zk) in self.free.iter().zip(&self.transforms).zip(z.iter()) {
            full[i] = t.to_external(zk);
        }
        Ok(full)
    }
}

impl<'a, F: LogLikelihood> LogLikelihood for SubspaceLikelihood<'a, F> {
    type Data = F::Data;

    fn value(&self, z: &Theta, data: &Self::Data) -> OptResult<f64> {
        self.inner.value(&self.to_full(z)?, data)
    }

    fn check(&self, z: &Theta, data: &Self::Data) -> OptResult<()> {
        self.inner.check(&self.to_full(z)?, data)
    }

    fn in_physical_region(&self, z: &Theta, data: &Self::Data) -> bool {
        self.to_full(z).is_ok_and(|full| self.inner.in_physical_region(&full, data))
    }

    /// Chain rule through the transforms; `GradientNotImplemented` from the
    /// inner model passes through so the adapter falls back to finite
    /// differences.
    fn grad(&self, z: &Theta, data: &Self::Data) -> OptResult<Grad> {
        let full_grad = self.inner.grad(&self.to_full(z)?, data)?;
        if full_grad.len() != self.template.len() {
            return Err(OptError::GradientDimMismatch {
                expected: self.template.len(),
                found: full_grad.len(),
            });
        }
        Ok(self
            .free
            .iter()
            .zip(&self.transforms)
            .zip(z.iter())
            .map(|((&i, t), &zk)| full_grad[i] * t.derivative(zk))
            .collect())
    }
}
