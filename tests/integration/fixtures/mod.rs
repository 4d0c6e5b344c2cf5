// Test fixtures with known Indonesian texts
// WHY: Deterministic inputs shared by pipeline, scoring and error-handling tests
#![allow(dead_code)]

/// Formal prose that avoids keys whose variants include themselves
pub const FORMAL_TEXT: &str = "Hasil penelitian menunjukkan bahwa metode ini sangat efektif. \
Oleh karena itu, pemerintah hendaknya mendukung program tersebut. \
Namun demikian, terdapat beberapa kendala yang harus diatasi. \
Sesungguhnya kendala tersebut dapat diselesaikan dengan mudah. \
Dengan demikian, dapat ditarik kesimpulan bahwa program ini sungguh bermanfaat.";

/// Two sentences sharing an opening pattern
pub const REPEATED_TEXT: &str =
    "Oleh karena itu, kita harus pergi. Oleh karena itu, kita harus pergi.";

/// Short, casual sentences: no formal keys, fillers, overused words or contractions
pub const CASUAL_TEXTS: &[&str] = &[
    "Kami makan nasi goreng di warung. Besok pagi kami berangkat ke kota. Cuaca hari ini cerah sekali.",
    "Adik main bola di lapangan. Ibu masak sayur asem.",
    "Kucing itu tidur di kursi! Anjing tetangga menggonggong terus? Aku jadi susah tidur.",
    "Hujan turun deras.",
];

/// Twenty words, one sentence
pub const TWENTY_WORDS: &str = "Kami berjalan pelan menyusuri pantai sambil menikmati angin sore \
dan melihat perahu nelayan pulang membawa ikan segar untuk dijual besok.";
