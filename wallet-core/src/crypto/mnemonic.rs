// wallet-core\src\crypto\mnemonic.rs
//
// Mnemonic Module - BIP-39 Codec
// Chuẩn: BIP-39 (entropy <-> words), checksum = SHA-256(entropy)[..ENT/32 bit]

use crate::crypto::entropy::{validate_bit_length, EntropySource, OsEntropy};
use crate::crypto::hash::sha256;
use crate::crypto::seed::{Seed, SeedDerivation};
use crate::error::{MnemonicError, WalletError, WalletResult};
use bip39::Language;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Mỗi word mã hoá 11 bit
const BITS_PER_WORD: usize = 11;
const WORD_MASK: u32 = (1 << BITS_PER_WORD) - 1;

/// Số lượng words hỗ trợ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    /// 12 words (128-bit entropy)
    Twelve = 12,
    /// 15 words (160-bit entropy)
    Fifteen = 15,
    /// 18 words (192-bit entropy)
    Eighteen = 18,
    /// 21 words (224-bit entropy)
    TwentyOne = 21,
    /// 24 words (256-bit entropy)
    TwentyFour = 24,
}

impl WordCount {
    /// Lấy số bytes entropy cần thiết
    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        match self {
            WordCount::Twelve => 16,
            WordCount::Fifteen => 20,
            WordCount::Eighteen => 24,
            WordCount::TwentyOne => 28,
            WordCount::TwentyFour => 32,
        }
    }

    #[inline]
    pub const fn entropy_bits(self) -> usize {
        self.entropy_bytes() * 8
    }

    /// Số bit checksum = ENT / 32
    #[inline]
    pub const fn checksum_bits(self) -> usize {
        self.entropy_bits() / 32
    }

    pub fn from_word_count(count: usize) -> Option<Self> {
        match count {
            12 => Some(WordCount::Twelve),
            15 => Some(WordCount::Fifteen),
            18 => Some(WordCount::Eighteen),
            21 => Some(WordCount::TwentyOne),
            24 => Some(WordCount::TwentyFour),
            _ => None,
        }
    }

    pub fn from_entropy_bits(bits: usize) -> WalletResult<Self> {
        validate_bit_length(bits)?;
        Self::from_word_count(bits * 3 / 32).ok_or_else(|| {
            WalletError::InvalidParameter(format!("Invalid entropy size: {} bits", bits))
        })
    }

    fn from_entropy_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(WordCount::Twelve),
            20 => Some(WordCount::Fifteen),
            24 => Some(WordCount::Eighteen),
            28 => Some(WordCount::TwentyOne),
            32 => Some(WordCount::TwentyFour),
            _ => None,
        }
    }
}

// =============================================================================
// CODEC
// =============================================================================

/// BIP-39 entropy <-> word sequence codec over an injected 2048-word list.
///
/// Wordlist là cấu hình read-only; encode và decode phải dùng cùng một list
/// để tương thích với các ví khác.
#[derive(Debug, Clone, Copy)]
pub struct MnemonicCodec {
    wordlist: &'static [&'static str; 2048],
}

impl MnemonicCodec {
    pub const fn new(wordlist: &'static [&'static str; 2048]) -> Self {
        Self { wordlist }
    }

    /// Codec over the canonical BIP-39 English list.
    pub fn english() -> Self {
        Self::new(Language::English.word_list())
    }

    /// Index of `word` in the list.
    pub fn word_index(&self, word: &str) -> Option<u16> {
        self.wordlist
            .iter()
            .position(|w| *w == word)
            .map(|i| i as u16)
    }

    pub fn word(&self, index: u16) -> Option<&'static str> {
        self.wordlist.get(index as usize).copied()
    }

    /// Entropy -> mnemonic phrase.
    ///
    /// Bit stream = entropy || SHA-256(entropy)[..ENT/32], cắt thành nhóm 11 bit,
    /// mỗi nhóm là index trong wordlist.
    pub fn encode(&self, entropy: &[u8]) -> WalletResult<WalletMnemonic> {
        let word_count = WordCount::from_entropy_len(entropy.len())
            .ok_or(MnemonicError::InvalidEntropyLength(entropy.len()))?;

        // CS <= 8 bit, byte đầu của hash là đủ
        let checksum_byte = sha256(entropy)[0];

        let mut words: Vec<&str> = Vec::with_capacity(word_count as usize);
        let mut acc: u32 = 0;
        let mut acc_bits = 0usize;
        for &byte in entropy.iter().chain(std::iter::once(&checksum_byte)) {
            acc = (acc << 8) | byte as u32;
            acc_bits += 8;
            while acc_bits >= BITS_PER_WORD && words.len() < word_count as usize {
                acc_bits -= BITS_PER_WORD;
                words.push(self.wordlist[((acc >> acc_bits) & WORD_MASK) as usize]);
            }
            acc &= (1 << acc_bits) - 1;
        }
        acc.zeroize();

        Ok(WalletMnemonic {
            phrase: words.join(" "),
            word_count: word_count as usize,
        })
    }

    /// Mnemonic phrase -> entropy, verifying the checksum.
    ///
    /// Whitespace được chuẩn hoá, so khớp word không phân biệt hoa thường.
    ///
    /// # Errors
    /// - `InvalidWordCount` nếu số word không thuộc {12, 15, 18, 21, 24}
    /// - `UnknownWord` nếu word không có trong wordlist
    /// - `ChecksumMismatch` nếu checksum không khớp
    pub fn decode(&self, phrase: &str) -> WalletResult<Zeroizing<Vec<u8>>> {
        let words: Zeroizing<Vec<String>> =
            Zeroizing::new(phrase.split_whitespace().map(str::to_lowercase).collect());
        let word_count = WordCount::from_word_count(words.len())
            .ok_or(MnemonicError::InvalidWordCount(words.len()))?;

        let total_bits = words.len() * BITS_PER_WORD;
        let mut bytes = Zeroizing::new(Vec::with_capacity((total_bits + 7) / 8));
        let mut acc: u32 = 0;
        let mut acc_bits = 0usize;
        for word in words.iter() {
            let index = self
                .word_index(word)
                .ok_or_else(|| MnemonicError::UnknownWord(word.clone()))?;
            acc = (acc << BITS_PER_WORD) | index as u32;
            acc_bits += BITS_PER_WORD;
            while acc_bits >= 8 {
                acc_bits -= 8;
                bytes.push((acc >> acc_bits) as u8);
            }
            acc &= (1 << acc_bits) - 1;
        }
        if acc_bits > 0 {
            // Bit còn dư dồn về phía MSB của byte cuối
            bytes.push((acc << (8 - acc_bits)) as u8);
        }
        acc.zeroize();

        let entropy_len = word_count.entropy_bytes();
        let shift = 8 - word_count.checksum_bits();
        let provided = bytes[entropy_len] >> shift;
        let expected = sha256(&bytes[..entropy_len])[0] >> shift;
        if provided != expected {
            return Err(MnemonicError::ChecksumMismatch.into());
        }

        Ok(Zeroizing::new(bytes[..entropy_len].to_vec()))
    }
}

impl Default for MnemonicCodec {
    fn default() -> Self {
        Self::english()
    }
}

// =============================================================================
// WALLET MNEMONIC
// =============================================================================

/// Wallet Mnemonic - BIP-39 phrase đã được kiểm tra checksum
///
/// # Security Architecture
/// - **ZeroizeOnDrop**: Phrase được tự động ghi đè bằng 0 khi struct bị drop
/// - **CSPRNG**: Entropy lấy từ `EntropySource` (mặc định `OsRng`)
/// - **No Debug Leak**: Custom Debug impl không hiển thị phrase
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WalletMnemonic {
    phrase: String,
    word_count: usize,
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị mnemonic phrase
impl std::fmt::Debug for WalletMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletMnemonic")
            .field("word_count", &self.word_count)
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl WalletMnemonic {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Tạo mnemonic mới với 12 words (128-bit entropy)
    pub fn new() -> WalletResult<Self> {
        Self::with_word_count(WordCount::Twelve)
    }

    /// Tạo mnemonic mới với 24 words (256-bit entropy)
    pub fn new_24_words() -> WalletResult<Self> {
        Self::with_word_count(WordCount::TwentyFour)
    }

    /// Tạo mnemonic với số lượng words tùy chỉnh từ OS CSPRNG
    pub fn with_word_count(word_count: WordCount) -> WalletResult<Self> {
        Self::generate(&OsEntropy, word_count)
    }

    /// Tạo mnemonic từ một entropy source bất kỳ
    pub fn generate<E: EntropySource + ?Sized>(
        source: &E,
        word_count: WordCount,
    ) -> WalletResult<Self> {
        let entropy = source.generate(word_count.entropy_bits())?;
        Self::from_entropy(&entropy)
    }

    /// Encode raw entropy (16..=32 bytes, bội số của 4)
    pub fn from_entropy(entropy: &[u8]) -> WalletResult<Self> {
        MnemonicCodec::english().encode(entropy)
    }

    /// Khôi phục mnemonic từ phrase có sẵn
    ///
    /// # Validation
    /// - Kiểm tra số lượng words (12, 15, 18, 21, 24)
    /// - Kiểm tra từng word có trong BIP-39 wordlist
    /// - Kiểm tra checksum
    pub fn from_phrase(phrase: &str) -> WalletResult<Self> {
        let entropy = MnemonicCodec::english().decode(phrase)?;
        // Re-encode để lưu dạng chuẩn (lowercase, single space)
        Self::from_entropy(&entropy)
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    /// Lấy mnemonic phrase
    ///
    /// # Warning
    /// Cẩn thận khi hiển thị hoặc log giá trị này!
    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn words(&self) -> Vec<&str> {
        self.phrase.split_whitespace().collect()
    }

    /// Decode lại entropy gốc
    pub fn to_entropy(&self) -> WalletResult<Zeroizing<Vec<u8>>> {
        MnemonicCodec::english().decode(&self.phrase)
    }

    // =========================================================================
    // SEED DERIVATION
    // =========================================================================

    /// Tạo seed từ mnemonic (PBKDF2-HMAC-SHA512)
    ///
    /// # Security Note
    /// Passphrase khác với password. Nếu mất passphrase, không thể khôi phục ví
    /// ngay cả khi có mnemonic phrase.
    pub fn to_seed(&self, passphrase: Option<&str>) -> Seed {
        SeedDerivation::derive(&self.phrase, passphrase.unwrap_or(""))
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Kiểm tra phrase: word count, wordlist, checksum
    #[inline]
    pub fn validate(phrase: &str) -> bool {
        MnemonicCodec::english().decode(phrase).is_ok()
    }

    /// Kiểm tra một từ có trong BIP-39 English wordlist không
    pub fn is_valid_word(word: &str) -> bool {
        MnemonicCodec::english().word_index(word).is_some()
    }

    /// Lấy strength (bit) của mnemonic
    pub fn strength_bits(&self) -> usize {
        WordCount::from_word_count(self.word_count)
            .map(WordCount::entropy_bits)
            .unwrap_or(0)
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
