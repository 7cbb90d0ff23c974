/// Quantidade de bits por unidade de armazenamento
pub const BITMAP_GROUP: usize = 8;

/// Conjunto de bits indexado por offset de código
///
/// Cada bit marca um destino de salto válido. O armazenamento cresce sob
/// demanda em grupos de [`BITMAP_GROUP`] bits; offsets nunca marcados (ou além
/// do fim lógico) são sempre `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpBitmap {
    buf: Vec<u8>,
}

impl JumpBitmap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cria um bitmap com capacidade reservada para `bits` offsets
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            buf: Vec::with_capacity(bits.div_ceil(BITMAP_GROUP)),
        }
    }

    /// Marca o offset, expandindo o armazenamento se necessário
    pub fn set(&mut self, offset: usize) {
        let idx = offset / BITMAP_GROUP;
        if idx >= self.buf.len() {
            self.buf.resize(idx + 1, 0);
        }
        self.buf[idx] |= 1 << (offset % BITMAP_GROUP);
    }

    /// Indica se o offset foi marcado
    pub fn is_set(&self, offset: usize) -> bool {
        self.buf
            .get(offset / BITMAP_GROUP)
            .is_some_and(|byte| byte & (1 << (offset % BITMAP_GROUP)) != 0)
    }

    /// Limpa todos os bits e zera o tamanho lógico, mantendo a capacidade
    pub fn reset(&mut self) {
        self.buf.fill(0);
        self.buf.clear();
    }

    /// Largura lógica em bits (sempre múltiplo de [`BITMAP_GROUP`])
    pub fn len_bits(&self) -> usize {
        self.buf.len() * BITMAP_GROUP
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Número de offsets marcados
    pub fn count(&self) -> usize {
        self.buf.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Offsets marcados, em ordem crescente
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.buf.iter().enumerate().flat_map(|(idx, &byte)| {
            (0..BITMAP_GROUP)
                .filter(move |bit| byte & (1 << bit) != 0)
                .map(move |bit| idx * BITMAP_GROUP + bit)
        })
    }

    /// Visão dos bytes de armazenamento (bit menos significativo primeiro)
    ///
    /// O buffer pode ser realocado por [`JumpBitmap::set`].
    pub fn as_raw(&self) -> &[u8] {
        &self.buf
    }

    pub fn capacity_bits(&self) -> usize {
        self.buf.capacity() * BITMAP_GROUP
    }

    pub fn shrink_to_fit(&mut self) {
        self.buf.shrink_to_fit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_query() {
        let mut bitmap = JumpBitmap::new();
        assert!(!bitmap.is_set(0));
        bitmap.set(3);
        bitmap.set(17);
        assert!(bitmap.is_set(3));
        assert!(bitmap.is_set(17));
        assert!(!bitmap.is_set(4));
        assert!(!bitmap.is_set(16));
        assert_eq!(bitmap.len_bits(), 24);
        assert_eq!(bitmap.count(), 2);
        assert_eq!(bitmap.iter().collect::<Vec<_>>(), vec![3, 17]);
    }

    #[test]
    fn out_of_range_is_false() {
        let mut bitmap = JumpBitmap::new();
        bitmap.set(0);
        assert!(!bitmap.is_set(8));
        assert!(!bitmap.is_set(usize::MAX));
    }

    #[test]
    fn grows_in_whole_groups() {
        let mut bitmap = JumpBitmap::new();
        bitmap.set(64);
        assert_eq!(bitmap.len_bits() % BITMAP_GROUP, 0);
        assert_eq!(bitmap.len_bits(), 72);
        assert_eq!(bitmap.as_raw()[8], 0b0000_0001);
        assert!(bitmap.as_raw()[..8].iter().all(|b| *b == 0));
    }

    #[test]
    fn reset_clears_and_keeps_capacity() {
        let mut bitmap = JumpBitmap::with_capacity(256);
        for offset in (0..200).step_by(3) {
            bitmap.set(offset);
        }
        let capacity = bitmap.capacity_bits();
        bitmap.reset();
        assert!(bitmap.is_empty());
        assert_eq!(bitmap.len_bits(), 0);
        assert_eq!(bitmap.count(), 0);
        assert!(!bitmap.is_set(3));
        assert_eq!(bitmap.capacity_bits(), capacity);

        // bits antigos não reaparecem ao crescer novamente
        bitmap.set(190);
        assert_eq!(bitmap.iter().collect::<Vec<_>>(), vec![190]);
    }
}
