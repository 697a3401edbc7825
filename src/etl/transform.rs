//! Transformer trait for data transformation

use eyre::Result;

/// Transformer trait for transforming data
///
/// Implementors define how to transform their input:
/// - Data cleaning (filling or removing values)
/// - Data enrichment (deriving columns)
/// - Representation changes
///
/// The input is taken by value, so a transformer owns the data for the
/// duration of its operation and hands it on when done.
///
/// # Example
/// ```
/// use titanic_etl::etl::Transformer;
/// use eyre::Result;
///
/// struct Doubler;
///
/// impl Transformer for Doubler {
///     type Input = Vec<i64>;
///     type Output = Vec<i64>;
///
///     fn transform(&self, input: Self::Input) -> Result<Self::Output> {
///         Ok(input.into_iter().map(|x| x * 2).collect())
///     }
/// }
///
/// let output = Doubler.then(Doubler).transform(vec![1, 2]).unwrap();
/// assert_eq!(output, vec![4, 8]);
/// ```
pub trait Transformer {
    /// Input type
    type Input;

    /// Output type after transformation
    type Output;

    /// Transform the input
    ///
    /// # Errors
    /// Returns an error if transformation fails (validation, conversion, etc.)
    fn transform(&self, input: Self::Input) -> Result<Self::Output>;

    /// Run `next` on the output of this transformer
    fn then<T>(self, next: T) -> Chain<Self, T>
    where
        Self: Sized,
        T: Transformer<Input = Self::Output>,
    {
        Chain {
            first: self,
            second: next,
        }
    }
}

/// Two transformers run in sequence, built with [`Transformer::then`]
///
/// The second step never runs if the first one fails.
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Transformer for Chain<A, B>
where
    A: Transformer,
    B: Transformer<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        let intermediate = self.first.transform(input)?;
        self.second.transform(intermediate)
    }
}
