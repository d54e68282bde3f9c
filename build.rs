// eeprom-probe - Build Script
//
// Propagates the ESP-IDF environment when cross-compiling for the ESP32.
// Host builds (library + tests) pass straight through.

fn main() {
    // ESP-IDF environment setup (MUST be first!)
    embuild::espidf::sysenv::output();
}
