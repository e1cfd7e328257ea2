/// The operand stack. Underflow returns 0 rather than failing, so
/// instructions can run on an empty stack.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stack {
    data: Vec<i64>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn push(&mut self, val: i64) {
        self.data.push(val);
    }

    /// Push values in order; the last one ends up on top.
    pub fn push_many(&mut self, vals: &[i64]) {
        self.data.extend_from_slice(vals);
    }

    #[inline(always)]
    pub fn pop(&mut self) -> i64 {
        self.data.pop().unwrap_or(0)
    }

    /// Pop `N` values, top first. Each missing value reads as 0.
    pub fn pop_n<const N: usize>(&mut self) -> [i64; N] {
        std::array::from_fn(|_| self.pop())
    }

    pub fn depth(&self) -> usize {
        self.data.len()
    }

    /// Values from bottom to top.
    pub fn as_slice(&self) -> &[i64] {
        &self.data
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn pop_n_is_reverse_of_pushes(vals in prop::collection::vec(any::<i64>(), 4..64)) {
            let mut stack = Stack::new();
            stack.push_many(&vals);
            let popped = stack.pop_n::<4>();
            let expected: Vec<i64> = vals.iter().rev().take(4).copied().collect();
            prop_assert_eq!(popped.to_vec(), expected);
            prop_assert_eq!(stack.depth(), vals.len() - 4);
        }

        #[test]
        fn empty_stack_always_pops_zero(n in 1usize..100) {
            let mut stack = Stack::new();
            for _ in 0..n {
                prop_assert_eq!(stack.pop(), 0);
            }
        }
    }
}
